//! End-to-end tests of the authenticated client over real HTTP.
//!
//! The backend and the identity provider are `wiremock` servers; requests
//! go through `ReqwestTransport` exactly as they do in the CLI.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mindcompass_application::{
    ApiClient, AuthSession, ClientConfig, ErrorCode, Navigator, NewJournalEntry,
};
use mindcompass_domain::{AuthError, AuthUser, BearerToken, MoodType};
use mindcompass_infrastructure::{FirebaseConfig, FirebaseSession, ReqwestTransport};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session handing out `cached` normally and `refreshed` when forced.
struct StaticSession {
    cached: String,
    refreshed: Option<String>,
    forced: AtomicUsize,
}

impl StaticSession {
    fn new(cached: &str, refreshed: Option<&str>) -> Self {
        Self {
            cached: cached.to_string(),
            refreshed: refreshed.map(str::to_string),
            forced: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthSession for StaticSession {
    fn current_user(&self) -> Option<AuthUser> {
        Some(AuthUser::new("u1"))
    }

    async fn id_token(
        &self,
        _user: &AuthUser,
        force_refresh: bool,
    ) -> Result<BearerToken, AuthError> {
        if !force_refresh {
            return Ok(BearerToken::new(&self.cached));
        }
        self.forced.fetch_add(1, Ordering::SeqCst);
        self.refreshed
            .as_deref()
            .map(BearerToken::new)
            .ok_or(AuthError::Provider {
                code: 400,
                message: "TOKEN_EXPIRED".to_string(),
            })
    }
}

#[derive(Default)]
struct RecordingNavigator {
    locations: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, location: &str) {
        self.locations.lock().unwrap().push(location.to_string());
    }
}

fn client(server: &MockServer, session: Arc<dyn AuthSession>) -> ApiClient<ReqwestTransport> {
    ApiClient::new(
        ClientConfig::new(server.uri()),
        Arc::new(ReqwestTransport::new().unwrap()),
        session,
    )
}

#[tokio::test]
async fn test_profile_request_carries_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("Authorization", "Bearer t1"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": "u1",
            "email": "ada@example.com",
            "displayName": "Ada"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client(&server, Arc::new(StaticSession::new("t1", None)))
        .users()
        .get_profile()
        .await
        .unwrap();

    assert_eq!(profile.uid, "u1");
    assert_eq!(profile.display_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/journal"))
        .and(header("Authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/journal"))
        .and(header("Authorization", "Bearer t2"))
        .and(body_json(json!({ "content": "hi", "mood": "calm" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "j1",
            "content": "hi",
            "mood": "calm"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let session = Arc::new(StaticSession::new("t1", Some("t2")));

    let entry = client(&server, Arc::clone(&session) as Arc<dyn AuthSession>)
        .journal()
        .create_entry(&NewJournalEntry {
            content: "hi".to_string(),
            mood: Some(MoodType::Calm),
        })
        .await
        .unwrap();

    assert_eq!(entry.id, "j1");
    assert_eq!(session.forced.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_second_unauthorized_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/goals"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "revoked" })))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server, Arc::new(StaticSession::new("t1", Some("t2"))))
        .goals()
        .get_goals()
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Status(401));
    assert_eq!(err.message, "revoked");
}

#[tokio::test]
async fn test_failed_refresh_redirects_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/moods"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    let navigator = Arc::new(RecordingNavigator::default());

    let err = client(&server, Arc::new(StaticSession::new("t1", None)))
        .with_navigator(Arc::clone(&navigator) as Arc<dyn Navigator>)
        .moods()
        .get_moods(mindcompass_application::MoodRange::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Status(401));
    assert_eq!(err.message, "Request failed with status code 401");
    assert_eq!(*navigator.locations.lock().unwrap(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_server_error_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/journal/j1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let err = client(&server, Arc::new(StaticSession::new("t1", None)))
        .journal()
        .delete_entry("j1")
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Status(500));
    assert_eq!(err.message, "boom");
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!({ "code": 500, "message": "boom" })
    );
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let client = ApiClient::new(
        ClientConfig::new(server.uri()).with_timeout(Duration::from_millis(100)),
        Arc::new(ReqwestTransport::new().unwrap()),
        Arc::new(StaticSession::new("t1", None)),
    );

    let err = client.health().check().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::NetworkError);
    assert_eq!(err.message, "timeout of 100ms exceeded");
}

#[tokio::test]
async fn test_firebase_session_drives_refresh() {
    let identity = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": "u1",
            "email": "ada@example.com",
            "idToken": "t1",
            "refreshToken": "r1",
            "expiresIn": "3600"
        })))
        .mount(&identity)
        .await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_token": "t2",
            "refresh_token": "r2",
            "expires_in": "3600"
        })))
        .expect(1)
        .mount(&identity)
        .await;

    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("Authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("Authorization", "Bearer t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uid": "u1" })))
        .expect(1)
        .mount(&backend)
        .await;

    let session = FirebaseSession::new(
        FirebaseConfig::new("test-key").with_base_url(&identity.uri()),
    )
    .unwrap();
    session.sign_in("ada@example.com", "secret").await.unwrap();

    let profile = client(&backend, Arc::new(session))
        .users()
        .get_profile()
        .await
        .unwrap();

    assert_eq!(profile.uid, "u1");
}
