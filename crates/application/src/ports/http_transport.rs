//! HTTP transport port

use std::future::Future;
use std::time::Duration;

use mindcompass_domain::request::AUTHORIZATION;
use mindcompass_domain::{ApiResponse, BearerToken, Headers, HttpMethod};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// A request ready for the wire: absolute URL, merged headers, timeout.
///
/// Each call owns its prepared request, so the Authorization replacement
/// done on replay never leaks into another call.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL including the query string
    pub url: Url,
    /// Headers to send
    pub headers: Headers,
    /// JSON body
    pub body: Option<Value>,
    /// Timeout for this dispatch
    pub timeout: Duration,
}

impl PreparedRequest {
    /// Sets `Authorization: Bearer <token>`, replacing any previous value.
    pub fn set_bearer(&mut self, token: &BearerToken) {
        self.headers.set(AUTHORIZATION, token.header_value());
    }

    /// Returns the Authorization header value, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION)
    }
}

/// Transport-level failures: no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request exceeded its timeout.
    #[error("timeout of {timeout_ms}ms exceeded")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was reached.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP library so that the client protocol can be
/// tested with an in-memory fake. Implementations return every response
/// they receive, whatever its status; only failures to obtain a response are
/// errors.
pub trait HttpTransport: Send + Sync {
    /// Executes a prepared request.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when no response could be obtained.
    fn execute(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
