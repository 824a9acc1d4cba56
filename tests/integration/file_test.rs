//! Integration tests for file operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

async fn create_file(app: &TestApp, token: &str, body: Value) -> Value {
    let response = app.request("POST", "/api/files", Some(body), Some(token)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.data().clone()
}

#[tokio::test]
async fn test_list_files_unauthenticated() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/files", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_get_file() {
    let app = TestApp::new();
    let token = app.register_and_login("files@example.com").await;

    let file = create_file(
        &app,
        &token,
        json!({ "name": "todo.md", "type": "markdown", "content": "- [ ] write" }),
    )
    .await;
    assert_eq!(file["path"], "/todo.md");
    assert_eq!(file["type"], "markdown");
    assert_eq!(file["folderId"], Value::Null);

    let id = file["id"].as_str().expect("id");
    let fetched = app
        .request("GET", &format!("/api/files?id={id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["content"], "- [ ] write");
}

#[tokio::test]
async fn test_non_markdown_type_is_text() {
    let app = TestApp::new();
    let token = app.register_and_login("text@example.com").await;

    let file = create_file(
        &app,
        &token,
        json!({ "name": "notes.txt", "type": "plain" }),
    )
    .await;

    assert_eq!(file["type"], "text");
    assert_eq!(file["content"], "");
}

#[tokio::test]
async fn test_create_requires_name_and_type() {
    let app = TestApp::new();
    let token = app.register_and_login("missing@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "name": "a.md" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "File name and type are required");
}

#[tokio::test]
async fn test_unknown_folder_places_file_at_root() {
    let app = TestApp::new();
    let token = app.register_and_login("root@example.com").await;

    let file = create_file(
        &app,
        &token,
        json!({
            "name": "stray.md",
            "type": "markdown",
            "folderId": "6f1c1d7e-0000-4000-8000-000000000000"
        }),
    )
    .await;

    assert_eq!(file["path"], "/stray.md");
    assert_eq!(file["folderId"], Value::Null);
}

#[tokio::test]
async fn test_save_and_rename() {
    let app = TestApp::new();
    let token = app.register_and_login("edit@example.com").await;

    let folder = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Notes" })),
            Some(&token),
        )
        .await;
    let folder_id = folder.data()["id"].as_str().expect("id").to_string();

    let file = create_file(
        &app,
        &token,
        json!({ "name": "a.md", "type": "markdown", "folderId": folder_id }),
    )
    .await;
    let id = file["id"].as_str().expect("id");

    let saved = app
        .request(
            "PUT",
            "/api/files",
            Some(json!({ "id": id, "content": "# Title" })),
            Some(&token),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.data()["content"], "# Title");
    assert_eq!(saved.data()["path"], "/Notes/a.md");

    let renamed = app
        .request(
            "PUT",
            "/api/files",
            Some(json!({ "id": id, "name": "b.md" })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["name"], "b.md");
    assert_eq!(renamed.data()["path"], "/Notes/b.md");
    assert_eq!(renamed.data()["content"], "# Title");
}

#[tokio::test]
async fn test_blank_rename_rejected() {
    let app = TestApp::new();
    let token = app.register_and_login("blank@example.com").await;
    let file = create_file(&app, &token, json!({ "name": "a.md", "type": "markdown" })).await;

    let response = app
        .request(
            "PUT",
            "/api/files",
            Some(json!({ "id": file["id"], "name": "" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_file() {
    let app = TestApp::new();
    let token = app.register_and_login("rm@example.com").await;
    let file = create_file(&app, &token, json!({ "name": "gone.md", "type": "markdown" })).await;
    let id = file["id"].as_str().expect("id");

    let deleted = app
        .request("DELETE", &format!("/api/files?id={id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.data()["id"], id);

    let again = app
        .request("DELETE", &format!("/api/files?id={id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let fetched = app
        .request("GET", &format!("/api/files?id={id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_file_not_found() {
    let app = TestApp::new();
    let token = app.register_and_login("nf@example.com").await;

    let response = app
        .request(
            "GET",
            "/api/files?id=00000000-0000-0000-0000-999999999999",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_files_are_owner_scoped() {
    let app = TestApp::new();
    let alice = app.register_and_login("alice@example.com").await;
    let bob = app.register_and_login("bob@example.com").await;

    let file = create_file(
        &app,
        &alice,
        json!({ "name": "diary.md", "type": "markdown", "content": "secret" }),
    )
    .await;
    let id = file["id"].as_str().expect("id");

    let list = app.request("GET", "/api/files", None, Some(&bob)).await;
    assert_eq!(list.data(), &json!([]));

    let get = app
        .request("GET", &format!("/api/files?id={id}"), None, Some(&bob))
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let overwrite = app
        .request(
            "PUT",
            "/api/files",
            Some(json!({ "id": id, "content": "hijacked" })),
            Some(&bob),
        )
        .await;
    assert_eq!(overwrite.status, StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", &format!("/api/files?id={id}"), None, Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let mine = app
        .request("GET", &format!("/api/files?id={id}"), None, Some(&alice))
        .await;
    assert_eq!(mine.data()["content"], "secret");
}

#[tokio::test]
async fn test_listing_is_ordered_by_path() {
    let app = TestApp::new();
    let token = app.register_and_login("order@example.com").await;

    for name in ["b.md", "a.md", "C.md"] {
        create_file(&app, &token, json!({ "name": name, "type": "markdown" })).await;
    }

    let list = app.request("GET", "/api/files", None, Some(&token)).await;
    let paths: Vec<&str> = list
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|f| f["path"].as_str())
        .collect();
    assert_eq!(paths, vec!["/C.md", "/a.md", "/b.md"]);
}

#[tokio::test]
async fn test_bad_query_string_is_json_error() {
    let app = TestApp::new();
    let token = app.register_and_login("query@example.com").await;

    let response = app
        .request("GET", "/api/files?id=a&id=b", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert!(
        response.body["message"]
            .as_str()
            .expect("message")
            .contains("duplicate field")
    );

    let response = app
        .request("DELETE", "/api/files?id=a&id=b", None, Some(&token))
        .await;
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_nul_content_rejected() {
    let app = TestApp::new();
    let token = app.register_and_login("nul@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "name": "a.md", "type": "markdown", "content": "a\u{0}b" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let created = create_file(
        &app,
        &token,
        json!({ "name": "b.md", "type": "markdown", "content": "ok" }),
    )
    .await;
    let id = created["id"].as_str().expect("id");

    let response = app
        .request(
            "PUT",
            "/api/files",
            Some(json!({ "id": id, "content": "\u{0}" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let fetched = app
        .request("GET", &format!("/api/files?id={id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.data()["content"], "ok");
}
