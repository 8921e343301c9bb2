//! Client configuration

use std::time::Duration;

use mindcompass_domain::Headers;
use mindcompass_domain::request::CONTENT_TYPE;

/// Backend used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Timeout applied to every call unless overridden per call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Location the user is sent to when a token refresh fails.
pub const LOGIN_PATH: &str = "/login";

/// Settings fixed at client construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every path is joined onto
    pub base_url: String,
    /// Default request timeout
    pub timeout: Duration,
    /// Headers sent with every request
    pub default_headers: Headers,
    /// Redirect target after a failed refresh
    pub login_path: String,
}

impl ClientConfig {
    /// Creates a configuration for the given base URL with default settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = Headers::new();
        default_headers.set(CONTENT_TYPE, "application/json");

        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            default_headers,
            login_path: LOGIN_PATH.to_string(),
        }
    }

    /// Sets the default timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.default_headers.get("content-type"),
            Some("application/json")
        );
        assert_eq!(config.login_path, "/login");
    }
}
