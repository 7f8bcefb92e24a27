//! Products client.
//!
//! Detail reads are keyed by slug (the public identifier); mutations go
//! through the admin endpoints by id. Creating or editing a product also
//! refreshes the category list, since either can introduce or orphan a
//! category.

use std::sync::Arc;

use operis_client::{QueryCache, Transport, cached_fetch};
use operis_core::{ClientError, ClientResult, ProductId, QueryKey};

use crate::product::{Product, ProductFilters, ProductInput, ProductPage};

fn product_lists() -> QueryKey {
    QueryKey::lists("products")
}

fn product_detail(slug: &str) -> QueryKey {
    QueryKey::detail("products", slug)
}

fn categories_key() -> QueryKey {
    QueryKey::root("products").child("categories")
}

fn require_id(id: &ProductId) -> ClientResult<()> {
    if id.is_empty() {
        return Err(ClientError::validation(0, "product id must not be empty"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ProductsClient {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
}

impl ProductsClient {
    pub fn new(transport: Arc<Transport>, cache: Arc<QueryCache>) -> Self {
        Self { transport, cache }
    }

    pub async fn list(&self, filters: &ProductFilters) -> ClientResult<ProductPage> {
        let params = filters.params();
        let key = QueryKey::list("products", &params);
        cached_fetch(&self.cache, &key, || self.transport.get("/products", &params)).await
    }

    /// Distinct category names currently in the catalog.
    pub async fn categories(&self) -> ClientResult<Vec<String>> {
        cached_fetch(&self.cache, &categories_key(), || {
            self.transport.get("/products/categories", &[])
        })
        .await
    }

    pub async fn get_by_slug(&self, slug: &str) -> ClientResult<Product> {
        if slug.is_empty() {
            return Err(ClientError::validation(0, "product slug must not be empty"));
        }
        let path = format!("/products/{slug}");
        cached_fetch(&self.cache, &product_detail(slug), || {
            self.transport.get(&path, &[])
        })
        .await
    }

    pub async fn create(&self, input: &ProductInput) -> ClientResult<Product> {
        let created: Product = self.transport.post("/products/admin", input).await?;
        self.invalidate_catalog();
        self.cache.write_through(&product_detail(&created.slug), &created);
        tracing::info!(product = %created.id, slug = %created.slug, "product created");
        Ok(created)
    }

    pub async fn update(&self, id: &ProductId, input: &ProductInput) -> ClientResult<Product> {
        require_id(id)?;
        let updated: Product = self
            .transport
            .patch(&format!("/products/admin/{id}"), input)
            .await?;
        self.invalidate_catalog();
        self.cache.write_through(&product_detail(&updated.slug), &updated);
        tracing::info!(product = %id, "product updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &ProductId) -> ClientResult<()> {
        require_id(id)?;
        self.transport.delete(&format!("/products/admin/{id}")).await?;
        self.cache.invalidate_prefix(&product_lists());
        tracing::info!(product = %id, "product deleted");
        Ok(())
    }

    fn invalidate_catalog(&self) {
        self.cache.invalidate_prefix(&product_lists());
        self.cache.invalidate(&categories_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use mockito::Matcher;
    use serde_json::json;

    use operis_client::{ClientConfig, TokenStore};

    fn products(server: &mockito::ServerGuard) -> (ProductsClient, Arc<QueryCache>) {
        let config = ClientConfig::new(server.url()).with_timeout(Duration::from_secs(5));
        let tokens = Arc::new(TokenStore::in_memory());
        let transport = Arc::new(
            Transport::new(&config, tokens).unwrap_or_else(|e| panic!("transport: {e}")),
        );
        let cache = Arc::new(QueryCache::new());
        (ProductsClient::new(transport, Arc::clone(&cache)), cache)
    }

    fn product_body(id: &str, slug: &str) -> serde_json::Value {
        json!({
            "id": id,
            "slug": slug,
            "name": "ThinkPad X1",
            "price": 32000000,
            "stock": 3,
            "category": "laptops",
            "specs": [],
            "full_specs": [],
            "is_active": true,
            "created_at": "2025-09-15T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn create_refreshes_lists_and_categories() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/products/admin")
            .match_body(Matcher::Json(json!({"name": "ThinkPad X1", "price": 32000000})))
            .with_status(201)
            .with_body(product_body("p1", "thinkpad-x1").to_string())
            .create_async()
            .await;

        let (client, cache) = products(&server);
        let list_key = QueryKey::list("products", &[]);
        let categories = QueryKey::root("products").child("categories");
        cache.write_through(&list_key, &json!({"products": [], "total": 0}));
        cache.write_through(&categories, &vec!["phones".to_string()]);

        let created = client
            .create(&ProductInput {
                name: Some("ThinkPad X1".to_string()),
                price: Some(32_000_000),
                ..Default::default()
            })
            .await
            .unwrap();
        mock.assert_async().await;

        assert!(!cache.contains_fresh(&list_key));
        assert!(!cache.contains_fresh(&categories));
        // The fresh detail is already cached under its slug.
        assert_eq!(client.get_by_slug("thinkpad-x1").await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_goes_to_the_admin_endpoint_by_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/products/admin/p1")
            .match_body(Matcher::Json(json!({"stock": 10})))
            .with_status(200)
            .with_body(product_body("p1", "thinkpad-x1").to_string())
            .create_async()
            .await;

        let (client, _cache) = products(&server);
        client
            .update(
                &ProductId::new("p1"),
                &ProductInput {
                    stock: Some(10),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_stales_lists_but_not_categories() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/products/admin/p1")
            .with_status(200)
            .with_body(r#"{"success":true}"#)
            .create_async()
            .await;

        let (client, cache) = products(&server);
        let list_key = QueryKey::list("products", &[("category", "laptops".to_string())]);
        let categories = QueryKey::root("products").child("categories");
        cache.write_through(&list_key, &json!({"products": [], "total": 0}));
        cache.write_through(&categories, &vec!["laptops".to_string()]);

        client.delete(&ProductId::new("p1")).await.unwrap();
        mock.assert_async().await;

        assert!(!cache.contains_fresh(&list_key));
        assert!(cache.contains_fresh(&categories));
    }

    #[tokio::test]
    async fn categories_are_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/categories")
            .with_status(200)
            .with_body(r#"["laptops","phones"]"#)
            .expect(1)
            .create_async()
            .await;

        let (client, _cache) = products(&server);
        let first = client.categories().await.unwrap();
        let second = client.categories().await.unwrap();
        mock.assert_async().await;
        assert_eq!(first, vec!["laptops", "phones"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn slug_detail_fetches_once_then_serves_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/thinkpad-x1")
            .with_status(200)
            .with_body(product_body("p1", "thinkpad-x1").to_string())
            .expect(1)
            .create_async()
            .await;

        let (client, _cache) = products(&server);
        let first = client.get_by_slug("thinkpad-x1").await.unwrap();
        let second = client.get_by_slug("thinkpad-x1").await.unwrap();
        mock.assert_async().await;
        assert_eq!(first.slug, "thinkpad-x1");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_slug_is_rejected_before_the_network() {
        let server = mockito::Server::new_async().await;
        let (client, _cache) = products(&server);
        assert!(matches!(
            client.get_by_slug("").await.unwrap_err(),
            ClientError::Validation { .. }
        ));
    }
}
