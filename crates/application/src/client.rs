//! Authenticated API client
//!
//! Every call goes through [`ApiClient::send`]:
//!
//! 1. the request is prepared against the configured base URL;
//! 2. the current user's id token is attached, if the session has a user;
//! 3. the request is dispatched;
//! 4. a `401` triggers one forced token refresh and one replay of the same
//!    request. The replay's outcome is final.
//!
//! Failures that are not recovered reach the caller as an [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use mindcompass_domain::{ApiRequest, ApiResponse, Headers, HttpMethod, QueryParams};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, RequestFailure};
use crate::ports::{
    AuthSession, HttpTransport, Navigator, NoopNavigator, PreparedRequest, TransportError,
};

/// Per-call overrides for the verb helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra query parameters
    pub query: QueryParams,
    /// Header overrides
    pub headers: Headers,
    /// Timeout override
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options carrying only query parameters.
    #[must_use]
    pub const fn with_query(query: QueryParams) -> Self {
        Self {
            query,
            headers: Headers::new(),
            timeout: None,
        }
    }

    fn apply(self, mut request: ApiRequest) -> ApiRequest {
        request.query.extend(&self.query);
        request.headers.merge(&self.headers);
        if self.timeout.is_some() {
            request.timeout = self.timeout;
        }
        request
    }
}

/// HTTP client that authenticates every call with the session's id token.
///
/// The client holds no token of its own; each call asks the session, so
/// calls running concurrently never share credential state.
pub struct ApiClient<T: HttpTransport> {
    transport: Arc<T>,
    session: Arc<dyn AuthSession>,
    navigator: Arc<dyn Navigator>,
    config: ClientConfig,
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a client. Failed refreshes do not navigate anywhere until a
    /// navigator is supplied with [`ApiClient::with_navigator`].
    pub fn new(config: ClientConfig, transport: Arc<T>, session: Arc<dyn AuthSession>) -> Self {
        Self {
            transport,
            session,
            navigator: Arc::new(NoopNavigator),
            config,
        }
    }

    /// Sets the navigator used after a failed token refresh.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request and returns the success response.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` for any failure not recovered by the single
    /// refresh-and-replay.
    pub async fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let mut prepared = self.prepare(request)?;
        self.attach_current_token(&mut prepared).await;

        match self.dispatch(&prepared).await {
            Ok(response) => Ok(response),
            Err(RequestFailure::Status(response)) if response.is_unauthorized() => {
                self.refresh_and_replay(prepared, response).await
            }
            Err(failure) => Err(failure.into()),
        }
    }

    /// Sends a request and decodes the JSON success body.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails or the body does not decode
    /// into `R`.
    pub async fn request<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        let response = self.send(&request).await?;
        response.json().map_err(|e| {
            ApiError::from(RequestFailure::Decode {
                status: response.status,
                message: e.to_string(),
            })
        })
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<R> {
        self.request(options.apply(ApiRequest::get(path))).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<R> {
        self.send_with_body(HttpMethod::Post, path, body, options).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<R> {
        self.send_with_body(HttpMethod::Put, path, body, options).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn patch<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<R> {
        self.send_with_body(HttpMethod::Patch, path, body, options).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<R> {
        self.request(options.apply(ApiRequest::delete(path))).await
    }

    async fn send_with_body<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> ApiResult<R> {
        let body =
            serde_json::to_value(body).map_err(|e| TransportError::InvalidBody(e.to_string()))?;
        let request = ApiRequest::new(method, path).with_body(body);
        self.request(options.apply(request)).await
    }

    /// Resolves a request against the base URL and default headers.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidUrl` if the URL cannot be built.
    pub fn prepare(&self, request: &ApiRequest) -> Result<PreparedRequest, TransportError> {
        let raw = if request.is_absolute() {
            request.path.clone()
        } else {
            format!(
                "{}/{}",
                self.config.base_url.trim_end_matches('/'),
                request.path.trim_start_matches('/')
            )
        };

        let mut url =
            Url::parse(&raw).map_err(|e| TransportError::InvalidUrl(format!("{e}: {raw}")))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in request.query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }

        let mut headers = self.config.default_headers.clone();
        headers.merge(&request.headers);

        Ok(PreparedRequest {
            method: request.method,
            url,
            headers,
            body: request.body.clone(),
            timeout: request.timeout.unwrap_or(self.config.timeout),
        })
    }

    /// Attaches the current (cached) token. Failures are logged, never
    /// surfaced: the request goes out without a credential.
    async fn attach_current_token(&self, prepared: &mut PreparedRequest) {
        let Some(user) = self.session.current_user() else {
            return;
        };

        match self.session.id_token(&user, false).await {
            Ok(token) => prepared.set_bearer(&token),
            Err(e) => warn!(error = %e, uid = %user.uid, "error getting auth token"),
        }
    }

    async fn dispatch(&self, prepared: &PreparedRequest) -> Result<ApiResponse, RequestFailure> {
        debug!(method = %prepared.method, url = %prepared.url, "dispatching request");

        let response = self.transport.execute(prepared).await?;
        if response.is_success() {
            Ok(response)
        } else {
            debug!(status = response.status, url = %prepared.url, "request failed");
            Err(RequestFailure::Status(response))
        }
    }

    /// Forces a token refresh and replays `prepared` once.
    ///
    /// The replay goes straight to `dispatch`, so a second `401` is returned
    /// as an error instead of triggering another refresh.
    async fn refresh_and_replay(
        &self,
        mut prepared: PreparedRequest,
        unauthorized: ApiResponse,
    ) -> ApiResult<ApiResponse> {
        let Some(user) = self.session.current_user() else {
            return Err(RequestFailure::Status(unauthorized).into());
        };

        match self.session.id_token(&user, true).await {
            Ok(token) => {
                prepared.set_bearer(&token);
                debug!(url = %prepared.url, "replaying request with refreshed token");
                self.dispatch(&prepared).await.map_err(ApiError::from)
            }
            Err(e) => {
                error!(error = %e, uid = %user.uid, "token refresh failed");
                self.navigator.redirect(&self.config.login_path);
                Err(RequestFailure::Status(unauthorized).into())
            }
        }
    }
}
