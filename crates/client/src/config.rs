//! Client configuration.

use std::time::Duration;

/// Environment variable selecting the backend base URL.
pub const ENV_BASE_URL: &str = "OPERIS_API_URL";

/// Local-development fallback when [`ENV_BASE_URL`] is absent.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3025/api";

/// Fixed request timeout; a request past this fails as a timeout error.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Debounce window collapsing overlapping 401 redirects into one.
pub const DEFAULT_REDIRECT_DEBOUNCE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub redirect_debounce: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            redirect_debounce: DEFAULT_REDIRECT_DEBOUNCE,
        }
    }

    /// Read the base URL from the environment, falling back to the local
    /// development default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_redirect_debounce(mut self, window: Duration) -> Self {
        self.redirect_debounce = window;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
