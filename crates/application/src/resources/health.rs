//! Health check

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::ports::HttpTransport;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Backend status string (e.g. `ok`)
    pub status: String,
}

/// Health endpoint.
pub struct HealthApi<'a, T: HttpTransport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> HealthApi<'a, T> {
    pub(super) const fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /health`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the backend is unreachable or unhealthy.
    pub async fn check(&self) -> ApiResult<HealthStatus> {
        self.client.get("/health", RequestOptions::new()).await
    }
}
