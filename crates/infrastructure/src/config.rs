//! Runtime settings.
//!
//! Settings come from `MINDCOMPASS_*` environment variables layered over
//! built-in defaults:
//!
//! | Variable                          | Default                     |
//! |-----------------------------------|-----------------------------|
//! | `MINDCOMPASS_API_URL`             | `http://localhost:8000`     |
//! | `MINDCOMPASS_TIMEOUT_SECS`        | `30`                        |
//! | `MINDCOMPASS_FIREBASE_API_KEY`    | none                        |
//! | `MINDCOMPASS_FIREBASE_AUTH_URL`   | identity toolkit endpoint   |
//! | `MINDCOMPASS_FIREBASE_TOKEN_URL`  | secure token endpoint       |

use std::collections::HashMap;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use mindcompass_application::ClientConfig;
use mindcompass_application::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::auth::{DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL, FirebaseConfig};

const ENV_PREFIX: &str = "MINDCOMPASS";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The configuration sources could not be read or deserialized.
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),

    /// A value was present but unusable.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Setting name
        key: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// A required value is missing.
    #[error("missing setting {0}")]
    Missing(&'static str),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Backend base URL
    pub api_url: String,
    /// Default request timeout in seconds
    pub timeout_secs: u64,
    /// Firebase web API key
    #[serde(default)]
    pub firebase_api_key: Option<String>,
    /// Identity toolkit base URL
    pub firebase_auth_url: String,
    /// Secure token base URL
    pub firebase_token_url: String,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Load` if a variable cannot be parsed.
    pub fn load() -> Result<Self, SettingsError> {
        Self::build(None)
    }

    /// Loads settings from an explicit variable map instead of the process
    /// environment. Keys are full variable names (`MINDCOMPASS_API_URL`).
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Load` if a variable cannot be parsed.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, SettingsError> {
        Self::build(Some(vars))
    }

    fn build(vars: Option<HashMap<String, String>>) -> Result<Self, SettingsError> {
        let timeout_secs = i64::try_from(DEFAULT_TIMEOUT.as_secs()).unwrap_or(i64::MAX);

        let config = Config::builder()
            .set_default("api_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", timeout_secs)?
            .set_default("firebase_auth_url", DEFAULT_AUTH_URL)?
            .set_default("firebase_token_url", DEFAULT_TOKEN_URL)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Builds the API client configuration.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` if the API URL is not an
    /// absolute URL or the timeout is zero.
    pub fn client_config(&self) -> Result<ClientConfig, SettingsError> {
        Url::parse(&self.api_url).map_err(|e| SettingsError::InvalidValue {
            key: "api_url",
            message: e.to_string(),
        })?;
        if self.timeout_secs == 0 {
            return Err(SettingsError::InvalidValue {
                key: "timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(ClientConfig::new(&self.api_url).with_timeout(Duration::from_secs(self.timeout_secs)))
    }

    /// Builds the Firebase configuration.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Missing` when no API key is configured.
    pub fn firebase_config(&self) -> Result<FirebaseConfig, SettingsError> {
        let api_key = self
            .firebase_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::Missing("firebase_api_key"))?;

        Ok(FirebaseConfig {
            api_key: api_key.to_string(),
            auth_url: self.firebase_auth_url.clone(),
            token_url: self.firebase_token_url.clone(),
        })
    }
}
