//! User profile endpoints

use mindcompass_domain::{UserPreferences, UserProfile};
use serde::Serialize;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::ports::HttpTransport;

const PROFILE_PATH: &str = "/api/v1/users/me";

/// Partial update of the user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// New photo URL
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// New biography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New profile goal statements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    /// New preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

/// User profile endpoints.
pub struct UsersApi<'a, T: HttpTransport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> UsersApi<'a, T> {
    pub(super) const fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `GET /api/v1/users/me`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn get_profile(&self) -> ApiResult<UserProfile> {
        self.client.get(PROFILE_PATH, RequestOptions::new()).await
    }

    /// `PATCH /api/v1/users/me`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserProfile> {
        self.client
            .patch(PROFILE_PATH, update, RequestOptions::new())
            .await
    }

    /// `DELETE /api/v1/users/me`
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the call fails.
    pub async fn delete_account(&self) -> ApiResult<()> {
        self.client.delete(PROFILE_PATH, RequestOptions::new()).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::client::tests::{MockSession, MockTransport};
    use crate::config::ClientConfig;
    use crate::ports::AuthSession;
    use mindcompass_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_profile_returns_payload() {
        let transport = Arc::new(
            MockTransport::new().respond(200, r#"{"uid":"u1","email":"a@b.com"}"#),
        );
        let session = Arc::new(MockSession::signed_in("t1", "t2"));
        let client = ApiClient::new(
            ClientConfig::new("http://api.test"),
            Arc::clone(&transport),
            session as Arc<dyn AuthSession>,
        );

        let profile = client.users().get_profile().await.unwrap();

        assert_eq!(profile.uid, "u1");
        assert_eq!(profile.email.as_deref(), Some("a@b.com"));
        assert_eq!(transport.sent()[0].url.path(), "/api/v1/users/me");
    }

    #[tokio::test]
    async fn test_update_profile_sends_only_set_fields() {
        let transport = Arc::new(MockTransport::new().respond(200, r#"{"uid":"u1"}"#));
        let session = Arc::new(MockSession::signed_in("t1", "t2"));
        let client = ApiClient::new(
            ClientConfig::new("http://api.test"),
            Arc::clone(&transport),
            session as Arc<dyn AuthSession>,
        );

        let update = ProfileUpdate {
            display_name: Some("Ada".to_string()),
            ..ProfileUpdate::default()
        };
        client.users().update_profile(&update).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].method, HttpMethod::Patch);
        assert_eq!(sent[0].body, Some(json!({ "displayName": "Ada" })));
    }

    #[tokio::test]
    async fn test_delete_account_accepts_empty_body() {
        let transport = Arc::new(MockTransport::new().respond(204, ""));
        let session = Arc::new(MockSession::signed_in("t1", "t2"));
        let client = ApiClient::new(
            ClientConfig::new("http://api.test"),
            Arc::clone(&transport),
            session as Arc<dyn AuthSession>,
        );

        client.users().delete_account().await.unwrap();
        assert_eq!(transport.sent()[0].method, HttpMethod::Delete);
    }
}
