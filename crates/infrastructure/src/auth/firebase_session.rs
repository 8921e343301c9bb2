//! Firebase Auth session.
//!
//! Email/password accounts against the Firebase Auth REST API. The session
//! owns the token pair: the id token is handed out until it is about to
//! expire, then exchanged for a new one with the refresh token.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mindcompass_application::ports::AuthSession;
use mindcompass_domain::{AuthError, AuthUser, BearerToken};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info};
use url::Url;

use super::wire::{
    AccountResponse, ErrorEnvelope, OobCodeRequest, PasswordRequest, RefreshResponse,
    UpdateProfileRequest,
};

/// Identity toolkit endpoint (account operations).
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Secure token endpoint (refresh grant).
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A cached id token is refreshed once it expires within this window.
const EXPIRY_BUFFER_SECS: i64 = 5 * 60;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Firebase project settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    /// Web API key of the project
    pub api_key: String,
    /// Base URL of the identity toolkit API
    pub auth_url: String,
    /// Base URL of the secure token API
    pub token_url: String,
}

impl FirebaseConfig {
    /// Creates a configuration using the public Google endpoints.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Points both APIs at one base URL (emulator or test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.auth_url = base_url.to_string();
        self.token_url = base_url.to_string();
        self
    }
}

struct TokenPair {
    id_token: BearerToken,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl TokenPair {
    fn new(id_token: String, refresh_token: String, expires_in: &str) -> Result<Self, AuthError> {
        let secs: i64 = expires_in
            .parse()
            .map_err(|e| AuthError::InvalidResponse {
                message: format!("invalid expiresIn {expires_in:?}: {e}"),
            })?;

        Ok(Self {
            id_token: BearerToken::new(id_token),
            refresh_token,
            expires_at: Utc::now() + TimeDelta::seconds(secs),
        })
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - TimeDelta::seconds(EXPIRY_BUFFER_SECS) > now
    }
}

struct SignedIn {
    user: AuthUser,
    tokens: TokenPair,
}

/// Session backed by Firebase Auth.
///
/// Auth-state changes are published on a `watch` channel; see
/// [`FirebaseSession::subscribe`].
pub struct FirebaseSession {
    http: reqwest::Client,
    config: FirebaseConfig,
    state: Mutex<Option<SignedIn>>,
    user_tx: watch::Sender<Option<AuthUser>>,
}

impl FirebaseSession {
    /// Creates a signed-out session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfiguration` if the API key is empty or
    /// the HTTP client cannot be built.
    pub fn new(config: FirebaseConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AuthError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        Self::with_client(config, http)
    }

    /// Creates a signed-out session using an existing reqwest client.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfiguration` if the API key is empty.
    pub fn with_client(config: FirebaseConfig, http: reqwest::Client) -> Result<Self, AuthError> {
        if config.api_key.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration {
                message: "missing Firebase API key".to_string(),
            });
        }

        let (user_tx, _) = watch::channel(None);
        Ok(Self {
            http,
            config,
            state: Mutex::new(None),
            user_tx,
        })
    }

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns the provider error, e.g. `EMAIL_EXISTS`.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthUser, AuthError> {
        let account: AccountResponse = self
            .post_json(
                self.auth_endpoint("accounts:signUp")?,
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        let user = self.establish(account).await?;

        match display_name {
            Some(name) => self.update_profile(Some(name), None).await,
            None => Ok(user),
        }
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the provider error, e.g. `INVALID_LOGIN_CREDENTIALS`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let account: AccountResponse = self
            .post_json(
                self.auth_endpoint("accounts:signInWithPassword")?,
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        self.establish(account).await
    }

    /// Drops the local session.
    pub async fn sign_out(&self) {
        let previous = self.state.lock().await.take();
        if let Some(signed) = previous {
            info!(uid = %signed.user.uid, "signed out");
        }
        self.user_tx.send_replace(None);
    }

    /// Sends a password reset email.
    ///
    /// # Errors
    ///
    /// Returns the provider error, e.g. `EMAIL_NOT_FOUND`.
    pub async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let _: serde_json::Value = self
            .post_json(
                self.auth_endpoint("accounts:sendOobCode")?,
                &OobCodeRequest {
                    request_type: "PASSWORD_RESET",
                    email,
                },
            )
            .await?;
        Ok(())
    }

    /// Updates the signed-in user's display name and photo URL. `None`
    /// keeps the current value.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotSignedIn` when nobody is signed in, or the
    /// provider error.
    pub async fn update_profile(
        &self,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<AuthUser, AuthError> {
        let mut state = self.state.lock().await;
        let signed = state.as_mut().ok_or(AuthError::NotSignedIn)?;
        self.ensure_fresh(signed, false).await?;

        let account: AccountResponse = self
            .post_json(
                self.auth_endpoint("accounts:update")?,
                &UpdateProfileRequest {
                    id_token: signed.tokens.id_token.as_str(),
                    display_name,
                    photo_url,
                    return_secure_token: true,
                },
            )
            .await?;

        if let (Some(id_token), Some(refresh_token), Some(expires_in)) =
            (account.id_token, account.refresh_token, &account.expires_in)
        {
            signed.tokens = TokenPair::new(id_token, refresh_token, expires_in)?;
        }
        if account.display_name.is_some() {
            signed.user.display_name = account.display_name;
        }
        if account.photo_url.is_some() {
            signed.user.photo_url = account.photo_url;
        }
        signed.user.email_verified |= account.email_verified;

        let user = signed.user.clone();
        drop(state);
        self.user_tx.send_replace(Some(user.clone()));
        Ok(user)
    }

    /// Subscribes to auth-state changes. The receiver starts at the current
    /// state and sees every sign-in, profile update and sign-out.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.user_tx.subscribe()
    }

    async fn establish(&self, account: AccountResponse) -> Result<AuthUser, AuthError> {
        let (Some(id_token), Some(refresh_token), Some(expires_in)) =
            (account.id_token, account.refresh_token, account.expires_in)
        else {
            return Err(AuthError::InvalidResponse {
                message: "account response without tokens".to_string(),
            });
        };

        let user = AuthUser {
            uid: account.local_id,
            email: account.email,
            display_name: account.display_name,
            photo_url: account.photo_url,
            email_verified: account.email_verified,
        };
        let tokens = TokenPair::new(id_token, refresh_token, &expires_in)?;

        *self.state.lock().await = Some(SignedIn {
            user: user.clone(),
            tokens,
        });
        info!(uid = %user.uid, "signed in");
        self.user_tx.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn ensure_fresh(&self, signed: &mut SignedIn, force: bool) -> Result<(), AuthError> {
        if !force && signed.tokens.is_fresh(Utc::now()) {
            return Ok(());
        }

        debug!(uid = %signed.user.uid, force, "refreshing id token");
        let mut url = endpoint(&self.config.token_url, "token")?;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "refresh_token")
            .append_pair("refresh_token", &signed.tokens.refresh_token)
            .finish();

        let refreshed: RefreshResponse = send(
            self.http
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(form),
        )
        .await?;

        signed.tokens = TokenPair::new(
            refreshed.id_token,
            refreshed.refresh_token,
            &refreshed.expires_in,
        )?;
        Ok(())
    }

    fn auth_endpoint(&self, method: &str) -> Result<Url, AuthError> {
        let mut url = endpoint(&self.config.auth_url, method)?;
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url)
    }

    async fn post_json<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<R, AuthError> {
        send(self.http.post(url).json(body)).await
    }
}

#[async_trait]
impl AuthSession for FirebaseSession {
    fn current_user(&self) -> Option<AuthUser> {
        self.user_tx.borrow().clone()
    }

    async fn id_token(
        &self,
        user: &AuthUser,
        force_refresh: bool,
    ) -> Result<BearerToken, AuthError> {
        let mut state = self.state.lock().await;
        let signed = state
            .as_mut()
            .filter(|signed| signed.user.uid == user.uid)
            .ok_or(AuthError::NotSignedIn)?;

        self.ensure_fresh(signed, force_refresh).await?;
        Ok(signed.tokens.id_token.clone())
    }
}

fn endpoint(base: &str, method: &str) -> Result<Url, AuthError> {
    let raw = format!("{}/{method}", base.trim_end_matches('/'));
    Url::parse(&raw).map_err(|e| AuthError::InvalidConfiguration {
        message: format!("{e}: {raw}"),
    })
}

async fn send<R: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<R, AuthError> {
    let response = builder.send().await.map_err(network_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(network_error)?;

    if !status.is_success() {
        return Err(provider_error(status.as_u16(), &body));
    }

    serde_json::from_slice(&body).map_err(|e| AuthError::InvalidResponse {
        message: e.to_string(),
    })
}

fn network_error(error: reqwest::Error) -> AuthError {
    AuthError::Network {
        message: error.to_string(),
    }
}

/// Maps `{ "error": { "code", "message" } }` to `AuthError::Provider`.
fn provider_error(status: u16, body: &[u8]) -> AuthError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => AuthError::Provider {
            code: envelope.error.code.unwrap_or(status),
            message: envelope.error.message,
        },
        Err(_) => AuthError::Provider {
            code: status,
            message: format!("request failed with status code {status}"),
        },
    }
}
