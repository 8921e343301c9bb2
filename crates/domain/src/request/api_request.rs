//! Outbound request description

use std::time::Duration;

use serde_json::Value;

use super::{Headers, HttpMethod, QueryParam, QueryParams};

/// A plain description of one backend call.
///
/// `path` is relative to the configured base URL unless it is already an
/// absolute `http(s)` URL. `headers` and `timeout` are per-call overrides
/// applied on top of the client defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path below the base URL (e.g. `/api/v1/users/me`)
    pub path: String,
    /// Query string parameters
    pub query: QueryParams,
    /// JSON body
    pub body: Option<Value>,
    /// Header overrides
    pub headers: Headers,
    /// Timeout override
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    /// Creates a PUT request with a JSON body.
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, path).with_body(body)
    }

    /// Creates a PATCH request with a JSON body.
    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Patch, path).with_body(body)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Sets a header override.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Overrides the client timeout for this call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns true if `path` is already an absolute URL.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_post_request() {
        let req = ApiRequest::post("/api/v1/journal", json!({ "content": "hi" }));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/api/v1/journal");
        assert_eq!(req.body, Some(json!({ "content": "hi" })));
    }

    #[test]
    fn test_builder_overrides() {
        let req = ApiRequest::get("/api/v1/moods")
            .with_query("startDate", "2024-01-01")
            .with_header("X-Request-Source", "cli")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(req.query.len(), 1);
        assert_eq!(req.headers.get("x-request-source"), Some("cli"));
        assert_eq!(req.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_is_absolute() {
        assert!(ApiRequest::get("https://status.example.com/health").is_absolute());
        assert!(!ApiRequest::get("/health").is_absolute());
    }
}
