//! Normalized API errors
//!
//! Every failure the client does not recover from reaches the caller as an
//! [`ApiError`]: a code, a human-readable message and the original failure.

use std::fmt;

use mindcompass_domain::ApiResponse;
use mindcompass_domain::response::UNAUTHORIZED;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::ports::TransportError;

/// Message used when no better description of a failure exists.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Error code: the HTTP status when a response exists, otherwise a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// HTTP status of the failing response
    Status(u16),
    /// No response was received
    NetworkError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "{status}"),
            Self::NetworkError => f.write_str("NETWORK_ERROR"),
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Status(status) => serializer.serialize_u16(*status),
            Self::NetworkError => serializer.serialize_str("NETWORK_ERROR"),
        }
    }
}

/// The failure underlying an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestFailure {
    /// The backend answered with a non-success status.
    #[error("Request failed with status code {}", .0.status)]
    Status(ApiResponse),

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A success response carried a body of the wrong shape.
    #[error("failed to decode response body: {message}")]
    Decode {
        /// Status of the response.
        status: u16,
        /// Decoder message.
        message: String,
    },
}

impl RequestFailure {
    /// Returns the response behind this failure, if one was received.
    #[must_use]
    pub const fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Status(response) => Some(response),
            Self::Transport(_) | Self::Decode { .. } => None,
        }
    }

    /// Returns the HTTP status behind this failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(response) => Some(response.status),
            Self::Decode { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// Error handed to callers of the API client.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status or `NETWORK_ERROR`
    pub code: ErrorCode,
    /// Backend message, failure message, or a generic fallback
    pub message: String,
    /// The failure before normalization
    #[source]
    #[serde(skip)]
    pub original_error: RequestFailure,
}

impl ApiError {
    /// Returns true if the final failure was an authorization failure.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.code == ErrorCode::Status(UNAUTHORIZED)
    }
}

impl From<RequestFailure> for ApiError {
    fn from(failure: RequestFailure) -> Self {
        let code = failure
            .status()
            .map_or(ErrorCode::NetworkError, ErrorCode::Status);

        let message = failure
            .response()
            .and_then(ApiResponse::error_message)
            .or_else(|| Some(failure.to_string()).filter(|m| !m.is_empty()))
            .unwrap_or_else(|| UNEXPECTED_ERROR.to_string());

        Self {
            code,
            message,
            original_error: failure,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        RequestFailure::from(error).into()
    }
}

/// Result type alias for API client operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mindcompass_domain::Headers;
    use pretty_assertions::assert_eq;

    fn status_failure(status: u16, body: &str) -> RequestFailure {
        RequestFailure::Status(ApiResponse::new(
            status,
            Headers::new(),
            body.as_bytes().to_vec(),
        ))
    }

    #[test]
    fn test_backend_message_wins() {
        let failure = status_failure(429, r#"{"message":"Quota exceeded"}"#);
        let error = ApiError::from(failure.clone());

        assert_eq!(
            error,
            ApiError {
                code: ErrorCode::Status(429),
                message: "Quota exceeded".to_string(),
                original_error: failure,
            }
        );
    }

    #[test]
    fn test_status_message_fallback() {
        let error = ApiError::from(status_failure(500, "Internal Server Error"));
        assert_eq!(error.code, ErrorCode::Status(500));
        assert_eq!(error.message, "Request failed with status code 500");
    }

    #[test]
    fn test_transport_error_uses_network_sentinel() {
        let error = ApiError::from(TransportError::DnsError {
            host: "api.invalid".to_string(),
            message: "no such host".to_string(),
        });
        assert_eq!(error.code, ErrorCode::NetworkError);
        assert_eq!(
            error.message,
            "DNS lookup failed for api.invalid: no such host"
        );
    }

    #[test]
    fn test_generic_fallback_for_empty_message() {
        let error = ApiError::from(TransportError::Other(String::new()));
        assert_eq!(error.code, ErrorCode::NetworkError);
        assert_eq!(error.message, UNEXPECTED_ERROR);
    }

    #[test]
    fn test_decode_failure_keeps_status() {
        let error = ApiError::from(RequestFailure::Decode {
            status: 200,
            message: "expected struct".to_string(),
        });
        assert_eq!(error.code, ErrorCode::Status(200));
        assert_eq!(
            error.message,
            "failed to decode response body: expected struct"
        );
    }

    #[test]
    fn test_unauthorized_follows_code() {
        assert!(ApiError::from(status_failure(401, "")).is_unauthorized());
        assert!(!ApiError::from(status_failure(403, "")).is_unauthorized());
        let network = ApiError::from(TransportError::Other("reset".to_string()));
        assert!(!network.is_unauthorized());
    }

    #[test]
    fn test_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::Status(401)).unwrap(),
            "401"
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::NetworkError).unwrap(),
            "\"NETWORK_ERROR\""
        );
        assert_eq!(ErrorCode::NetworkError.to_string(), "NETWORK_ERROR");
    }

    #[test]
    fn test_error_serializes_without_original() {
        let error = ApiError::from(status_failure(404, r#"{"message":"Not found"}"#));
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": 404, "message": "Not found" })
        );
    }
}
