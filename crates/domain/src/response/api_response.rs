//! Backend response type

use serde::de::DeserializeOwned;

use crate::request::Headers;

/// Status code the backend uses for a missing or expired credential.
pub const UNAUTHORIZED: u16 = 401;

/// A response received from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Raw response body
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: u16, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the backend rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == UNAUTHORIZED
    }

    /// Decodes the body as JSON.
    ///
    /// An empty (or whitespace-only) body decodes as JSON `null`, so callers
    /// expecting `()` or `Option<T>` accept `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_slice(b"null");
        }
        serde_json::from_slice(&self.body)
    }

    /// Extracts a non-empty `message` string from a JSON error body.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(status, Headers::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_status_checks() {
        assert!(response(201, "").is_success());
        assert!(!response(401, "").is_success());
        assert!(response(401, "").is_unauthorized());
        assert!(!response(403, "").is_unauthorized());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            response(429, r#"{"message":"Quota exceeded"}"#).error_message(),
            Some("Quota exceeded".to_string())
        );
        assert_eq!(response(500, r#"{"message":""}"#).error_message(), None);
        assert_eq!(response(500, r#"{"detail":"boom"}"#).error_message(), None);
        assert_eq!(response(502, "<html>Bad Gateway</html>").error_message(), None);
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        assert!(response(204, "").json::<()>().is_ok());

        let missing: Option<String> = response(204, "  ").json().unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_json_body() {
        let value: serde_json::Value = response(200, r#"{"status":"ok"}"#).json().unwrap();
        assert_eq!(value["status"], "ok");
    }
}
