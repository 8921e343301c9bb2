//! Authentication types shared by the session and the API client.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque short-lived credential issued by the identity provider.
///
/// The token value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Returns the first few characters of the token for log output.
    #[must_use]
    pub fn preview(&self) -> String {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) if self.0.len() > 12 => format!("{}...", &self.0[..idx]),
            _ => "***".to_string(),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&self.preview()).finish()
    }
}

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Provider-assigned user id
    pub uid: String,
    /// Email address, if known
    #[serde(default)]
    pub email: Option<String>,
    /// Display name, if set
    #[serde(default)]
    pub display_name: Option<String>,
    /// Profile photo URL, if set
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Whether the email address was verified
    #[serde(default)]
    pub email_verified: bool,
}

impl AuthUser {
    /// Creates a user with only an id.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            photo_url: None,
            email_verified: false,
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// An operation needs a signed-in user and there is none.
    #[error("no authenticated user")]
    NotSignedIn,

    /// The identity provider rejected the request.
    #[error("identity provider error {code}: {message}")]
    Provider {
        /// HTTP status returned by the provider.
        code: u16,
        /// Provider error code (e.g. `EMAIL_NOT_FOUND`).
        message: String,
    },

    /// The identity provider could not be reached.
    #[error("network error: {message}")]
    Network {
        /// Error description.
        message: String,
    },

    /// The provider answered with a body that could not be understood.
    #[error("invalid identity provider response: {message}")]
    InvalidResponse {
        /// Error description.
        message: String,
    },

    /// The session is missing required configuration (e.g. an API key).
    #[error("invalid auth configuration: {message}")]
    InvalidConfiguration {
        /// Error description.
        message: String,
    },
}
