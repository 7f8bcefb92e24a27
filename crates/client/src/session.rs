//! Session store: login state and the admin gate.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use operis_core::{ClientError, ClientResult, QueryKey, UserId};

use crate::cache::{QueryCache, cached_fetch};
use crate::token_store::TokenStore;
use crate::transport::Transport;

/// Account role; only `admin` may hold a session in this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile cached for the logged-in operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    user: SessionUser,
}

fn current_user_key() -> QueryKey {
    QueryKey::detail("auth", "me")
}

/// Tracks the one live session. Token presence means "authenticated";
/// the cached profile's role gates the admin surface.
#[derive(Debug, Clone)]
pub struct Session {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
    tokens: Arc<TokenStore>,
}

impl Session {
    pub fn new(transport: Arc<Transport>, cache: Arc<QueryCache>, tokens: Arc<TokenStore>) -> Self {
        Self {
            transport,
            cache,
            tokens,
        }
    }

    /// Exchange credentials for a session.
    ///
    /// The backend may accept credentials for a non-admin account; that is
    /// still a failure here: the token is discarded immediately and the
    /// caller sees `InsufficientPrivilege` (no redirect, no session).
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<SessionUser> {
        let resp: LoginResponse = self.transport.post("/auth/login", credentials).await?;
        self.tokens.set(&resp.access_token);

        if resp.user.role != Role::Admin {
            self.tokens.clear();
            tracing::warn!(email = %credentials.email, "login rejected: account is not an admin");
            return Err(ClientError::InsufficientPrivilege);
        }

        self.cache.write_through(&current_user_key(), &resp.user);
        tracing::info!(user = %resp.user.id, "admin session established");
        Ok(resp.user)
    }

    /// End the session. The backend call is best-effort; local state is
    /// cleared unconditionally and the login navigation fires.
    pub async fn logout(&self) {
        if let Err(e) = self
            .transport
            .post_unit("/auth/logout", &serde_json::json!({}))
            .await
        {
            tracing::debug!("logout notification failed (ignored): {e}");
        }
        self.tokens.clear();
        self.cache.clear();
        self.transport.notify_unauthenticated();
    }

    /// Current operator profile; only issued when a token is present.
    /// A failed attempt means "not authenticated", never a retry.
    pub async fn current_user(&self) -> ClientResult<SessionUser> {
        if !self.is_authenticated() {
            return Err(ClientError::Unauthorized);
        }
        cached_fetch(&self.cache, &current_user_key(), || {
            self.transport.get("/auth/me", &[])
        })
        .await
    }

    /// Token presence; not verified cryptographically client-side.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Cached profile role equals admin. Protected views require this
    /// *and* `is_authenticated`; disagreement behaves as unauthenticated.
    pub fn is_admin(&self) -> bool {
        self.cache
            .lookup::<SessionUser>(&current_user_key())
            .is_some_and(|user| user.role == Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_deserializes_from_lowercase() {
        assert_eq!(serde_json::from_str::<Role>(r#""admin""#).unwrap(), Role::Admin);
        assert_eq!(serde_json::from_str::<Role>(r#""user""#).unwrap(), Role::User);
    }

    #[test]
    fn session_user_reads_camel_case_profile() {
        let user: SessionUser = serde_json::from_str(
            r#"{"id":"u1","email":"ops@operis.vn","name":"Ops","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.id, UserId::new("u1"));
    }
}
