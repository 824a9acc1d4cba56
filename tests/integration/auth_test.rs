//! Integration tests for registration, login and sessions.

mod helpers;

use axum::http::StatusCode;
use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(json!({ "email": "ada@example.com", "password": PASSWORD, "name": "Ada" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let user = response.data();
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["name"], "Ada");
    assert!(user.get("passwordHash").is_none());

    let token = app.login("ada@example.com", PASSWORD).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register_and_login("dup@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(json!({ "email": "dup@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert_eq!(response.body["message"], "User already exists");
}

#[tokio::test]
async fn test_register_missing_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(json!({ "email": "nopass@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Email and password are required");
}

#[tokio::test]
async fn test_malformed_json_is_a_json_error() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/auth/login", Some(json!("not an object")), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new();
    app.register_and_login("wrong@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "wrong@example.com", "password": "not it at all" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_requires_bearer_token() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/auth/session", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    let garbage = app
        .request("GET", "/api/auth/session", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_credential_session_has_no_github_token() {
    let app = TestApp::new();
    let token = app.register_and_login("me@example.com").await;

    let response = app
        .request("GET", "/api/auth/session", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["user"]["email"], "me@example.com");
    assert_eq!(response.data()["githubConnected"], false);
}

#[tokio::test]
async fn test_github_authorize_url() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/github", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let url = response.data()["url"].as_str().expect("url");
    assert!(url.contains("/login/oauth/authorize?"));
    assert!(url.contains("client_id=client-id"));
    assert!(url.contains("scope=read%3Auser+user%3Aemail+repo"));
    assert!(!response.data()["state"].as_str().expect("state").is_empty());
    assert!(response.data().get("nonce").is_none());

    let cookie = response.set_cookie();
    assert!(cookie.starts_with("notehub_oauth_nonce="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn test_github_callback_requires_nonce_cookie() {
    let server = MockServer::start_async().await;
    let exchange = server
        .mock_async(|when, then| {
            when.method(POST).path("/login/oauth/access_token");
            then.status(200).json_body(json!({ "access_token": "gho_test" }));
        })
        .await;
    let app = TestApp::with_github(&server);

    let (state, _) = app.begin_github_sign_in().await;
    let (_, other_cookie) = app.begin_github_sign_in().await;

    // Valid state, but no cookie from the browser that started the flow.
    let missing = app
        .request(
            "GET",
            &format!("/api/auth/github/callback?code=abc&state={state}"),
            None,
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    // Valid state replayed into a different browser session.
    let mismatched = app
        .request_with_headers(
            "GET",
            &format!("/api/auth/github/callback?code=abc&state={state}"),
            None,
            None,
            &[("cookie", other_cookie.as_str())],
        )
        .await;
    assert_eq!(mismatched.status, StatusCode::UNAUTHORIZED);
    assert_eq!(exchange.hits_async().await, 0);
}

#[tokio::test]
async fn test_github_callback_clears_nonce_cookie() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login/oauth/access_token");
            then.status(200).json_body(json!({ "access_token": "gho_test" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user");
            then.status(200).json_body(json!({
                "id": 42,
                "login": "octo",
                "email": "octo@example.com"
            }));
        })
        .await;

    let (state, cookie) = app.begin_github_sign_in().await;
    let callback = app
        .request_with_headers(
            "GET",
            &format!("/api/auth/github/callback?code=abc&state={state}"),
            None,
            None,
            &[("cookie", cookie.as_str())],
        )
        .await;

    assert_eq!(callback.status, StatusCode::OK, "{:?}", callback.body);
    assert!(callback.set_cookie().contains("Max-Age=0"));
}

#[tokio::test]
async fn test_github_sign_in_creates_linked_user() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);

    let token = app.sign_in_with_github(&server, "octo@example.com").await;

    let response = app
        .request("GET", "/api/auth/session", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["githubConnected"], true);
    assert_eq!(data["user"]["email"], "octo@example.com");
    assert_eq!(data["user"]["name"], "Octo Cat");
    assert_eq!(data["user"]["githubUsername"], "octo");
}

#[tokio::test]
async fn test_github_sign_in_links_existing_account() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);
    app.register_and_login("octo@example.com").await;

    app.sign_in_with_github(&server, "octo@example.com").await;

    // The password keeps working after the account is linked.
    let token = app.login("octo@example.com", PASSWORD).await;
    let response = app
        .request("GET", "/api/auth/session", None, Some(&token))
        .await;
    assert_eq!(response.data()["user"]["githubUsername"], "octo");
}

#[tokio::test]
async fn test_github_callback_rejects_forged_state() {
    let server = MockServer::start_async().await;
    let exchange = server
        .mock_async(|when, then| {
            when.method(POST).path("/login/oauth/access_token");
            then.status(200).json_body(json!({ "access_token": "gho_test" }));
        })
        .await;
    let app = TestApp::with_github(&server);

    let response = app
        .request(
            "GET",
            "/api/auth/github/callback?code=abc&state=forged",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(exchange.hits_async().await, 0);
}

#[tokio::test]
async fn test_github_callback_requires_code() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/auth/github/callback", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_github_rejected_code_is_unauthorized() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/login/oauth/access_token");
            then.status(200).json_body(json!({
                "error": "bad_verification_code",
                "error_description": "The code passed is incorrect or expired."
            }));
        })
        .await;
    let profile = server
        .mock_async(|when, then| {
            when.method(GET).path("/user");
            then.status(200).json_body(json!({ "id": 1, "login": "octo" }));
        })
        .await;
    let app = TestApp::with_github(&server);

    let (state, cookie) = app.begin_github_sign_in().await;

    let response = app
        .request_with_headers(
            "GET",
            &format!("/api/auth/github/callback?code=stale&state={state}"),
            None,
            None,
            &[("cookie", cookie.as_str())],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["details"]["error"], "bad_verification_code");
    assert_eq!(profile.hits_async().await, 0);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"], "memory");
}
