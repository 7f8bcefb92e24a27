//! HTTP transport: single point of outbound request construction and
//! inbound response normalization.
//!
//! Every request carries the session token as a bearer credential when one
//! is present. Every 2xx JSON body is camelized exactly once before typed
//! deserialization. A 401 from any request clears the token and fires the
//! registered unauthorized handler at most once per debounce window.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use operis_core::{ClientError, ClientResult, camelize};

use crate::config::ClientConfig;
use crate::redirect::RedirectGuard;
use crate::token_store::TokenStore;

/// Callback invoked when the session becomes unauthenticated (401 or
/// logout); the embedding application navigates to its login entry point.
pub type UnauthorizedHandler = Box<dyn Fn() + Send + Sync>;

pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    guard: RedirectGuard,
    on_unauthorized: Mutex<Option<UnauthorizedHandler>>,
}

impl Transport {
    pub fn new(config: &ClientConfig, tokens: Arc<TokenStore>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            guard: RedirectGuard::new(config.redirect_debounce),
            on_unauthorized: Mutex::new(None),
        })
    }

    /// Register the navigation side effect for authentication failures.
    pub fn set_unauthorized_handler(&self, handler: impl Fn() + Send + Sync + 'static) {
        *self.handler_slot() = Some(Box::new(handler));
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with query parameters appended only when present (callers pass
    /// only the filters that are actually set).
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ClientResult<T> {
        let mut req = self.http.get(self.url(path));
        if !params.is_empty() {
            req = req.query(params);
        }
        let body = self.send(req).await?;
        parse(&body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(self.http.post(self.url(path)).json(body)).await?;
        parse(&body)
    }

    /// POST where the caller does not consume the response body.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(())
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(self.http.patch(self.url(path)).json(body)).await?;
        parse(&body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(self.http.put(self.url(path)).json(body)).await?;
        parse(&body)
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    /// Fire the unauthorized handler unconditionally (logout navigation).
    pub fn notify_unauthenticated(&self) {
        if let Some(handler) = self.handler_slot().as_ref() {
            handler();
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, mut req: reqwest::RequestBuilder) -> ClientResult<String> {
        if let Some(token) = self.tokens.get() {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(map_transport_error)?;
        let status = resp.status();
        let body = resp.text().await.map_err(map_transport_error)?;

        if status.is_success() {
            return Ok(body);
        }

        if status.as_u16() == 401 {
            self.handle_unauthorized();
        }
        let err = ClientError::from_status(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), "request failed: {err}");
        Err(err)
    }

    fn handle_unauthorized(&self) {
        // Token clear happens on every 401; the redirect is debounced.
        self.tokens.clear();
        if self.guard.try_enter() {
            tracing::info!("session expired, redirecting to login");
            if let Some(handler) = self.handler_slot().as_ref() {
                handler();
            }
        }
    }

    fn handler_slot(&self) -> std::sync::MutexGuard<'_, Option<UnauthorizedHandler>> {
        self.on_unauthorized.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::network(e.to_string())
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ClientError::decode(e.to_string()))?;
    serde_json::from_value(camelize(value)).map_err(|e| ClientError::decode(e.to_string()))
}
