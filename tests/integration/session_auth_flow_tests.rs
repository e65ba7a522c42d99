// ===========================================
// tests/integration/session_auth_flow_tests.rs
// ===========================================
//! `/api/v1` guarded by session cookies
use authgate_lib::config::AuthType;
use axum::http::{Method, StatusCode};
use serde_json::json;
use crate::test_utils::{memory_app, send};

const LOGIN: &str = "/api/v1/auth_session/login";
const LOGOUT: &str = "/api/v1/auth_session/logout";

#[tokio::test]
async fn test_login_errors() {
    let (app, state) = memory_app(AuthType::SessionAuth);
    state.accounts.register_user("bob@hbtn.io", "pwd").unwrap();

    let response = send(&app, Method::POST, LOGIN, &[], Some("password=pwd")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({"error": "email missing"}));

    let response = send(&app, Method::POST, LOGIN, &[], Some("email=bob@hbtn.io")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({"error": "password missing"}));

    let response = send(&app, Method::POST, LOGIN, &[], Some("email=nobody@hbtn.io&password=pwd")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({"error": "no user found for this email"}));

    let response = send(&app, Method::POST, LOGIN, &[], Some("email=bob@hbtn.io&password=nope")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json(), json!({"error": "wrong password"}));
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_login_me_logout() {
    let (app, state) = memory_app(AuthType::SessionAuth);
    state.accounts.register_user("bob@hbtn.io", "pwd").unwrap();
    let cookie_name = state.session_auth.cookie_name().to_string();

    let response = send(&app, Method::POST, LOGIN, &[], Some("email=bob@hbtn.io&password=pwd")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["email"], "bob@hbtn.io");
    let session_id = response.cookie(&cookie_name).unwrap();
    assert_eq!(state.sessions.len(), 1);

    let cookie = format!("{cookie_name}={session_id}");
    let response = send(&app, Method::GET, "/api/v1/users/me", &[("cookie", cookie.as_str())], None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["email"], "bob@hbtn.io");

    let response = send(&app, Method::DELETE, LOGOUT, &[("cookie", cookie.as_str())], None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({}));
    assert!(state.sessions.is_empty());

    let response = send(&app, Method::GET, "/api/v1/users/me", &[("cookie", cookie.as_str())], None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // a stale cookie no longer authenticates, so the guard answers first
    let response = send(&app, Method::DELETE, LOGOUT, &[("cookie", cookie.as_str())], None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_foreign_cookie_is_unauthorized() {
    let (app, _) = memory_app(AuthType::SessionAuth);
    let response = send(&app, Method::GET, "/api/v1/users/me", &[("cookie", "other=1")], None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
