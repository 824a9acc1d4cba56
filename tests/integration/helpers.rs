//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::{Value, json};
use tower::ServiceExt;

use notehub_api::{AppState, build_app};
use notehub_core::config::AppConfig;
use notehub_database::Stores;
use notehub_database::memory::MemoryStore;

/// Default password used by [`TestApp::register_and_login`].
pub const PASSWORD: &str = "correct horse battery";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The in-memory store behind the router
    pub store: MemoryStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// App over an empty in-memory store. GitHub calls go to an address
    /// nothing listens on.
    pub fn new() -> Self {
        let mut config = test_config();
        config.github.api_base_url = "http://127.0.0.1:9".to_string();
        config.github.oauth_base_url = "http://127.0.0.1:9".to_string();
        Self::with_config(config)
    }

    /// App whose GitHub API and OAuth host are `server`.
    pub fn with_github(server: &MockServer) -> Self {
        let mut config = test_config();
        config.github.api_base_url = server.base_url();
        config.github.oauth_base_url = server.base_url();
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        let store = MemoryStore::new();
        let state = AppState::new(config.clone(), Stores::memory(store.clone()))
            .expect("Failed to build app state");

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Register a credentials account and return its session token.
    pub async fn register_and_login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/register",
                Some(json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );

        self.login(email, PASSWORD).await
    }

    /// Login and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.data()["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Run the GitHub OAuth flow against `server` and return a session
    /// token that carries the GitHub access token `gho_test`.
    pub async fn sign_in_with_github(&self, server: &MockServer, email: &str) -> String {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/login/oauth/access_token");
                then.status(200).json_body(json!({
                    "access_token": "gho_test",
                    "token_type": "bearer",
                    "scope": "read:user,user:email,repo"
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/user")
                    .header("authorization", "Bearer gho_test");
                then.status(200).json_body(json!({
                    "id": 42,
                    "login": "octo",
                    "name": "Octo Cat",
                    "email": email
                }));
            })
            .await;

        let (state, cookie) = self.begin_github_sign_in().await;

        let callback = self
            .request_with_headers(
                "GET",
                &format!("/api/auth/github/callback?code=abc&state={state}"),
                None,
                None,
                &[("cookie", cookie.as_str())],
            )
            .await;
        assert_eq!(
            callback.status,
            StatusCode::OK,
            "GitHub sign-in failed: {:?}",
            callback.body
        );

        callback.data()["token"]
            .as_str()
            .expect("No token in callback response")
            .to_string()
    }

    /// Call the authorize endpoint and return the `state` plus the
    /// `name=value` part of the nonce cookie it set.
    pub async fn begin_github_sign_in(&self) -> (String, String) {
        let authorize = self.request("GET", "/api/auth/github", None, None).await;
        assert_eq!(authorize.status, StatusCode::OK, "{:?}", authorize.body);
        let state = authorize.data()["state"]
            .as_str()
            .expect("No state in authorize response")
            .to_string();
        let cookie = authorize
            .set_cookie()
            .split(';')
            .next()
            .unwrap_or_default()
            .to_string();
        (state, cookie)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[])
            .await
    }

    /// Make an HTTP request with additional headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        assert_eq!(self.body["success"], json!(true), "Not a success body: {:?}", self.body);
        &self.body["data"]
    }

    /// The `Set-Cookie` header, or an empty string.
    pub fn set_cookie(&self) -> &str {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.provider = "memory".to_string();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.github.client_id = "client-id".to_string();
    config.github.client_secret = "client-secret".to_string();
    config
}
