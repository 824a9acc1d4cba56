//! Integration tests for repository management and sync.

mod helpers;

use axum::http::StatusCode;
use httpmock::Method::{GET, PATCH, POST};
use httpmock::MockServer;
use serde_json::json;

use helpers::TestApp;

fn repository(name: &str, default_branch: &str) -> serde_json::Value {
    json!({
        "id": 7,
        "name": name,
        "full_name": format!("octo/{name}"),
        "owner": { "login": "octo" },
        "private": false,
        "description": "Synced from notehub",
        "html_url": format!("https://github.com/octo/{name}"),
        "default_branch": default_branch
    })
}

#[tokio::test]
async fn test_credential_session_cannot_use_github() {
    let app = TestApp::new();
    let token = app.register_and_login("local@example.com").await;

    let repos = app
        .request("GET", "/api/github/repos", None, Some(&token))
        .await;
    assert_eq!(repos.status, StatusCode::UNAUTHORIZED);

    let sync = app
        .request(
            "POST",
            "/api/github/sync",
            Some(json!({ "repositoryOwner": "octo", "repositoryName": "notes" })),
            Some(&token),
        )
        .await;
    assert_eq!(sync.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_repositories() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);
    let token = app.sign_in_with_github(&server, "octo@example.com").await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/user/repos")
                .query_param("sort", "updated")
                .header("authorization", "Bearer gho_test");
            then.status(200)
                .json_body(json!([repository("notes", "main"), repository("blog", "main")]));
        })
        .await;

    let response = app
        .request("GET", "/api/github/repos", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let repos = response.data().as_array().expect("array");
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0]["fullName"], "octo/notes");
    assert_eq!(repos[0]["owner"], "octo");
    assert_eq!(repos[0]["url"], "https://github.com/octo/notes");
}

#[tokio::test]
async fn test_create_repository() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);
    let token = app.sign_in_with_github(&server, "octo@example.com").await;

    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/user/repos").json_body(json!({
                "name": "notes",
                "description": "Synced from notehub",
                "private": true,
                "auto_init": true
            }));
            then.status(201).json_body(repository("notes", "main"));
        })
        .await;

    let response = app
        .request(
            "POST",
            "/api/github/repos",
            Some(json!({ "name": "notes", "isPrivate": true })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["name"], "notes");
    create.assert_async().await;
}

#[tokio::test]
async fn test_create_repository_conflict_is_forwarded() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);
    let token = app.sign_in_with_github(&server, "octo@example.com").await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/user/repos");
            then.status(422).json_body(json!({
                "message": "Repository creation failed.",
                "errors": [{ "field": "name", "message": "name already exists on this account" }]
            }));
        })
        .await;

    let response = app
        .request(
            "POST",
            "/api/github/repos",
            Some(json!({ "name": "notes" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), "UPSTREAM_ERROR");
    assert_eq!(response.body["details"]["message"], "Repository creation failed.");
}

#[tokio::test]
async fn test_sync_requires_repository() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);
    let token = app.sign_in_with_github(&server, "octo@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/github/sync",
            Some(json!({ "repositoryOwner": "octo" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Repository name and owner are required");
}

#[tokio::test]
async fn test_sync_to_existing_branch() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);
    let token = app.sign_in_with_github(&server, "octo@example.com").await;

    let folder = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Notes" })),
            Some(&token),
        )
        .await;
    let folder_id = folder.data()["id"].as_str().expect("id").to_string();
    for (name, folder) in [("a.md", Some(folder_id.as_str())), ("readme.txt", None)] {
        let response = app
            .request(
                "POST",
                "/api/files",
                Some(json!({ "name": name, "type": "markdown", "content": name, "folderId": folder })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octo/notes");
            then.status(200).json_body(repository("notes", "main"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octo/notes/git/refs/heads/main");
            then.status(200).json_body(json!({
                "ref": "refs/heads/main",
                "object": { "sha": "head0", "type": "commit" }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octo/notes/git/commits/head0");
            then.status(200).json_body(json!({
                "sha": "head0",
                "tree": { "sha": "tree0" },
                "parents": []
            }));
        })
        .await;
    let tree = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/repos/octo/notes/git/trees")
                .body_contains(r#""base_tree":"tree0""#)
                .body_contains(r#""path":"Notes/a.md""#)
                .body_contains(r#""path":"readme.txt""#);
            then.status(201).json_body(json!({ "sha": "tree1" }));
        })
        .await;
    let commit = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/repos/octo/notes/git/commits")
                .body_contains(r#""parents":["head0"]"#)
                .body_contains(r#""tree":"tree1""#);
            then.status(201).json_body(json!({
                "sha": "commit1",
                "tree": { "sha": "tree1" },
                "parents": [{ "sha": "head0" }]
            }));
        })
        .await;
    let update_ref = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/repos/octo/notes/git/refs/heads/main")
                .json_body(json!({ "sha": "commit1", "force": false }));
            then.status(200).json_body(json!({
                "ref": "refs/heads/main",
                "object": { "sha": "commit1", "type": "commit" }
            }));
        })
        .await;

    let response = app
        .request(
            "POST",
            "/api/github/sync",
            Some(json!({ "repositoryOwner": "octo", "repositoryName": "notes" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["commitSha"], "commit1");
    assert_eq!(response.data()["filesCount"], 2);
    assert_eq!(response.data()["branch"], "main");
    tree.assert_async().await;
    commit.assert_async().await;
    update_ref.assert_async().await;
}

#[tokio::test]
async fn test_sync_failure_forwards_remote_status() {
    let server = MockServer::start_async().await;
    let app = TestApp::with_github(&server);
    let token = app.sign_in_with_github(&server, "octo@example.com").await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/repos/octo/missing");
            then.status(404).json_body(json!({ "message": "Not Found" }));
        })
        .await;

    let response = app
        .request(
            "POST",
            "/api/github/sync",
            Some(json!({ "repositoryOwner": "octo", "repositoryName": "missing" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "UPSTREAM_ERROR");
    assert_eq!(response.body["details"]["message"], "Not Found");
}
