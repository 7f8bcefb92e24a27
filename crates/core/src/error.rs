//! Client error model.

use thiserror::Error;

/// Result type used across the client layer.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failure taxonomy surfaced to callers of the API client.
///
/// Keep this focused on what a caller can act on: retry the action
/// (`Timeout`, `Network`, `Server`), re-authenticate (`Unauthorized`),
/// fix the input (`Validation`), or render an empty state (`NotFound`).
/// The client never retries automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request exceeded the transport's fixed timeout.
    #[error("request timed out")]
    Timeout,

    /// The request never produced an HTTP response (DNS, connect, TLS...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the credentials or session (HTTP 401).
    #[error("authentication required")]
    Unauthorized,

    /// Credentials were accepted but the account lacks the admin role.
    #[error("insufficient privilege")]
    InsufficientPrivilege,

    /// A 4xx with a structured error body (field-level, surfaced inline).
    #[error("validation failed ({status}): {message}")]
    Validation { status: u16, message: String },

    /// The requested entity does not exist (HTTP 404).
    #[error("not found")]
    NotFound,

    /// The backend failed (HTTP 5xx).
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// The response body could not be parsed into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Client-side configuration problem (bad base URL, unwritable store).
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn validation(status: u16, msg: impl Into<String>) -> Self {
        Self::Validation {
            status,
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Classify a non-success HTTP status into the taxonomy.
    ///
    /// For 4xx validation failures the message is taken from the structured
    /// error body (`message` or `error` field) when present, falling back to
    /// the raw body text.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            400..=499 => Self::Validation {
                status,
                message: extract_error_message(body),
            },
            _ => Self::Server {
                status,
                body: body.to_string(),
            },
        }
    }

    /// True when the failure indicates the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error"] {
            if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    body.to_string()
}
