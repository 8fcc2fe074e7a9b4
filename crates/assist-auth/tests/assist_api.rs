//! Integration tests for the assistant-API authenticator.
//!
//! A local axum server stands in for the remote auth endpoint and replays
//! a scripted answer while recording every request body it receives.
#![allow(clippy::tests_outside_test_module)]

use std::sync::{Arc, Mutex};

use assist_auth::{
    Account, AssistApiAuth, Authenticator, CredentialResolver, ErrorCode, RequestParams,
    hash_client_password,
};
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde_json::{Value, json};

const DEFAULT_CLIENT: &str = "test_client_v1";

// ============================================================================
// Mock assistant API
// ============================================================================

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockServer {
    /// Start a server that answers every auth call with `status` and `body`.
    async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body: body.into(),
            requests: requests.clone(),
        };
        let app = Router::new()
            .route("/authentication", post(handle_auth))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/"),
            requests,
        }
    }

    async fn json(body: Value) -> Self {
        Self::start(StatusCode::OK, body.to_string()).await
    }

    fn authenticator(&self) -> AssistApiAuth {
        AssistApiAuth::new(&self.base_url, DEFAULT_CLIENT)
    }

    fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

// Json extraction also asserts that the client sent `Content-Type: application/json`.
async fn handle_auth(State(state): State<MockState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.requests.lock().unwrap().push(body);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

async fn login(server: &MockServer, params: &RequestParams) -> (bool, Account, AssistApiAuth) {
    let resolver = CredentialResolver::new(DEFAULT_CLIENT);
    let mut auth = server.authenticator();
    let mut account = Account::new();
    let ok = account.authenticate(params, &resolver, &mut auth).await;
    (ok, account, auth)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_successful_login_populates_account() {
    let server = MockServer::json(json!({
        "result": "success",
        "access_level": 1,
        "user_name": {"nick": "", "first": "Jane", "last": "Doe"},
        "user_lang_code": "de",
        "user_birth": "1990.01.31",
        "user_roles": ["Admin", "User"],
        "keyToken": "a1b2c3"
    }))
    .await;

    let params = RequestParams::with_password("Jane@Example.com", "secret");
    let (ok, account, auth) = login(&server, &params).await;

    assert!(ok);
    assert_eq!(auth.error_code(), ErrorCode::Success);
    assert_eq!(account.user_id(), "jane@example.com");
    assert_eq!(account.access_level(), 1);
    assert_eq!(account.user_name_short(), "Jane");
    assert_eq!(account.preferred_language(), "de");
    assert_eq!(account.birth_date(), "1990.01.31");
    assert_eq!(
        account.user_roles(),
        Some(&["admin".to_string(), "user".to_string()][..])
    );
    assert!(account.has_role("admin"));
    assert_eq!(account.info().get("keyToken"), Some(&json!("a1b2c3")));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        json!({
            "KEY": format!("jane@example.com;{}", hash_client_password("secret")),
            "action": "check",
            "client": DEFAULT_CLIENT
        })
    );
}

#[tokio::test]
async fn test_request_client_is_forwarded() {
    let server = MockServer::json(json!({"result": "success"})).await;

    let params = RequestParams::with_key("uid1001;token").client("android_app_v2");
    let (ok, account, _) = login(&server, &params).await;

    assert!(ok);
    assert_eq!(account.user_roles(), Some(&[][..]));
    assert_eq!(server.requests()[0]["client"], json!("android_app_v2"));
    assert_eq!(server.requests()[0]["KEY"], json!("uid1001;token"));
}

#[tokio::test]
async fn test_rejected_login() {
    let server = MockServer::json(json!({"result": "fail"})).await;

    let params = RequestParams::with_key("jane;wrong");
    let (ok, account, auth) = login(&server, &params).await;

    assert!(!ok);
    assert_eq!(auth.error_code(), ErrorCode::AuthRejected);
    assert_eq!(auth.error_code().as_i32(), 2);
    assert_eq!(account, Account::new());
}

#[tokio::test]
async fn test_http_error_is_transport_failure() {
    let server = MockServer::start(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;

    let params = RequestParams::with_key("jane;tok");
    let (ok, account, auth) = login(&server, &params).await;

    assert!(!ok);
    assert_eq!(auth.error_code(), ErrorCode::Transport);
    assert_eq!(auth.error_code().as_i32(), 3);
    assert_eq!(account, Account::new());
}

#[tokio::test]
async fn test_malformed_response_is_transport_failure() {
    for body in ["<html>maintenance</html>", "[1, 2, 3]", ""] {
        let server = MockServer::start(StatusCode::OK, body).await;

        let params = RequestParams::with_key("jane;tok");
        let (ok, account, auth) = login(&server, &params).await;

        assert!(!ok, "body {body:?}");
        assert_eq!(auth.error_code(), ErrorCode::Transport, "body {body:?}");
        assert_eq!(account, Account::new());
    }
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let server = MockServer::json(json!({"result": "success"})).await;

    for params in [
        RequestParams::default(),
        RequestParams::with_password("jane", ""),
        RequestParams::with_key("no-separator"),
    ] {
        let (ok, account, _) = login(&server, &params).await;
        assert!(!ok);
        assert_eq!(account, Account::new());
    }
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_empty_secret_still_reaches_server() {
    let server = MockServer::json(json!({"result": "fail"})).await;

    let params = RequestParams::with_key("jane;");
    let (ok, _, auth) = login(&server, &params).await;

    assert!(!ok);
    assert_eq!(auth.error_code(), ErrorCode::AuthRejected);
    assert_eq!(server.requests()[0]["KEY"], json!("jane;"));
}

#[tokio::test]
async fn test_loose_field_types() {
    let server = MockServer::json(json!({
        "access_level": "not-a-number",
        "user_name": {},
        "user_lang_code": 7
    }))
    .await;

    let params = RequestParams::with_key("jane;tok");
    let (ok, account, auth) = login(&server, &params).await;

    assert!(ok);
    assert_eq!(auth.access_level(), 0);
    assert_eq!(account.access_level(), 0);
    assert_eq!(account.preferred_language(), "en");
    assert!(account.user_name().is_none());
    assert_eq!(account.user_name_short(), "Boss");
}

#[tokio::test]
async fn test_authenticator_reused_across_calls() {
    let server = MockServer::json(json!({"result": "success", "user_roles": ["user"]})).await;
    let mut auth = server.authenticator();

    assert!(auth.authenticate("Alice", "tok", "").await);
    assert_eq!(auth.user_id(), "alice");
    assert_eq!(auth.basic_info().roles, Some(vec!["user".to_string()]));

    assert!(auth.authenticate("Bob", "tok", "").await);
    assert_eq!(auth.user_id(), "bob");
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_export_import_after_remote_login() {
    let server = MockServer::json(json!({
        "access_level": 0,
        "user_name": {"first": "Jane"},
        "user_lang_code": "fr",
        "user_roles": ["Editor"]
    }))
    .await;

    let params = RequestParams::with_key("jane;tok");
    let (ok, account, _) = login(&server, &params).await;
    assert!(ok);

    let mut restored = Account::new();
    restored.import_json(&account.export_json()).unwrap();
    assert_eq!(restored.user_id(), account.user_id());
    assert_eq!(restored.access_level(), 0);
    assert_eq!(restored.preferred_language(), "fr");
    assert_eq!(restored.birth_date(), "");
    assert_eq!(restored.user_roles(), account.user_roles());
    assert_eq!(restored.user_name_short(), "Jane");
}
