//! Analytics client.

use std::sync::Arc;

use operis_client::{QueryCache, Transport, cached_fetch};
use operis_core::{ClientError, ClientResult, QueryKey, UserId};

use crate::period::Period;
use crate::stats::{PlatformOverview, UserStats};

fn overview_key(params: &[(&str, String)]) -> QueryKey {
    QueryKey::root("analytics").child("overview").with_params(params)
}

fn user_stats_key(id: &UserId, params: &[(&str, String)]) -> QueryKey {
    QueryKey::root("analytics")
        .child("users")
        .child(id.as_str())
        .with_params(params)
}

#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
}

impl AnalyticsClient {
    pub fn new(transport: Arc<Transport>, cache: Arc<QueryCache>) -> Self {
        Self { transport, cache }
    }

    /// Platform overview for a window. Presets hit the overview endpoint;
    /// a custom window goes to the range endpoint with explicit bounds.
    pub async fn overview(&self, period: Period) -> ClientResult<PlatformOverview> {
        let params = period.params();
        let path = if period.is_custom() {
            "/analytics/admin/range"
        } else {
            "/analytics/admin/overview"
        };
        cached_fetch(&self.cache, &overview_key(&params), || {
            self.transport.get(path, &params)
        })
        .await
    }

    /// Usage statistics for one account. Only preset windows exist here;
    /// the backend has no per-user range endpoint.
    pub async fn user_stats(&self, id: &UserId, period: Period) -> ClientResult<UserStats> {
        if id.is_empty() {
            return Err(ClientError::validation(0, "user id must not be empty"));
        }
        if period.is_custom() {
            return Err(ClientError::validation(
                0,
                "custom date ranges are not available for per-user statistics",
            ));
        }
        let params = period.params();
        let path = format!("/analytics/admin/users/{id}");
        cached_fetch(&self.cache, &user_stats_key(id, &params), || {
            self.transport.get(&path, &params)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::NaiveDate;
    use mockito::Matcher;
    use serde_json::json;

    use operis_client::{ClientConfig, TokenStore};

    fn analytics(server: &mockito::ServerGuard) -> (AnalyticsClient, Arc<QueryCache>) {
        let config = ClientConfig::new(server.url()).with_timeout(Duration::from_secs(5));
        let tokens = Arc::new(TokenStore::in_memory());
        let transport = Arc::new(
            Transport::new(&config, tokens).unwrap_or_else(|e| panic!("transport: {e}")),
        );
        let cache = Arc::new(QueryCache::new());
        (AnalyticsClient::new(transport, Arc::clone(&cache)), cache)
    }

    #[tokio::test]
    async fn preset_windows_use_the_overview_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/analytics/admin/overview")
            .match_query(Matcher::UrlEncoded("period".into(), "week".into()))
            .with_status(200)
            .with_body(
                json!({
                    "stats": {"revenue": 5000000, "tokens_used": 12000000},
                    "previous": {"revenue": 4000000, "tokens_used": 9000000}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let (client, _cache) = analytics(&server);
        let overview = client.overview(Period::Week).await.unwrap();
        mock.assert_async().await;
        assert_eq!(overview.stats.revenue, 5_000_000);
        assert_eq!(overview.previous.unwrap().revenue, 4_000_000);
    }

    #[tokio::test]
    async fn custom_windows_use_the_range_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/analytics/admin/range")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("start".into(), "2025-10-01".into()),
                Matcher::UrlEncoded("end".into(), "2025-10-31".into()),
            ]))
            .with_status(200)
            .with_body(json!({"stats": {"revenue": 1}}).to_string())
            .create_async()
            .await;

        let (client, _cache) = analytics(&server);
        let start: NaiveDate = "2025-10-01".parse().unwrap();
        let end: NaiveDate = "2025-10-31".parse().unwrap();
        client
            .overview(Period::Custom { start, end })
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn legacy_current_field_still_decodes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/analytics/admin/users/u1")
            .match_query(Matcher::UrlEncoded("period".into(), "month".into()))
            .with_status(200)
            .with_body(json!({"current": {"tokens_used": 42, "requests": 7}}).to_string())
            .create_async()
            .await;

        let (client, _cache) = analytics(&server);
        let stats = client
            .user_stats(&UserId::new("u1"), Period::Month)
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(stats.stats.tokens_used, 42);
        assert_eq!(stats.stats.requests, 7);
    }

    #[tokio::test]
    async fn distinct_periods_are_cached_independently() {
        let mut server = mockito::Server::new_async().await;
        let today = server
            .mock("GET", "/analytics/admin/overview")
            .match_query(Matcher::UrlEncoded("period".into(), "today".into()))
            .with_status(200)
            .with_body(json!({"stats": {"revenue": 1}}).to_string())
            .expect(1)
            .create_async()
            .await;
        let month = server
            .mock("GET", "/analytics/admin/overview")
            .match_query(Matcher::UrlEncoded("period".into(), "month".into()))
            .with_status(200)
            .with_body(json!({"stats": {"revenue": 30}}).to_string())
            .expect(1)
            .create_async()
            .await;

        let (client, _cache) = analytics(&server);
        assert_eq!(client.overview(Period::Today).await.unwrap().stats.revenue, 1);
        assert_eq!(client.overview(Period::Month).await.unwrap().stats.revenue, 30);
        // Cached on the second read.
        assert_eq!(client.overview(Period::Today).await.unwrap().stats.revenue, 1);
        today.assert_async().await;
        month.assert_async().await;
    }

    #[tokio::test]
    async fn custom_window_is_rejected_for_user_stats() {
        let server = mockito::Server::new_async().await;
        let (client, _cache) = analytics(&server);
        let start: NaiveDate = "2025-10-01".parse().unwrap();
        let err = client
            .user_stats(&UserId::new("u1"), Period::Custom { start, end: start })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));
    }
}
