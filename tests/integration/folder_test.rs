//! Integration tests for folder operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

async fn create_folder(app: &TestApp, token: &str, name: &str, parent: Option<&str>) -> Value {
    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": name, "parentId": parent })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.data().clone()
}

#[tokio::test]
async fn test_folders_require_session() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/folders", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_nested_paths() {
    let app = TestApp::new();
    let token = app.register_and_login("paths@example.com").await;

    let notes = create_folder(&app, &token, "Notes", None).await;
    assert_eq!(notes["path"], "/Notes");
    assert_eq!(notes["parentId"], Value::Null);

    let id = notes["id"].as_str().expect("id");
    let daily = create_folder(&app, &token, "Daily", Some(id)).await;
    assert_eq!(daily["path"], "/Notes/Daily");
    assert_eq!(daily["parentId"], id);

    let list = app.request("GET", "/api/folders", None, Some(&token)).await;
    let paths: Vec<&str> = list
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|f| f["path"].as_str())
        .collect();
    assert_eq!(paths, vec!["/Notes", "/Notes/Daily"]);
}

#[tokio::test]
async fn test_unknown_parent_lands_at_root() {
    let app = TestApp::new();
    let token = app.register_and_login("orphan@example.com").await;

    let folder = create_folder(
        &app,
        &token,
        "Loose",
        Some("00000000-0000-0000-0000-000000000000"),
    )
    .await;

    assert_eq!(folder["path"], "/Loose");
    assert_eq!(folder["parentId"], Value::Null);
}

#[tokio::test]
async fn test_create_requires_name() {
    let app = TestApp::new();
    let token = app.register_and_login("noname@example.com").await;

    let response = app
        .request("POST", "/api/folders", Some(json!({})), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Folder name is required");
}

#[tokio::test]
async fn test_rename_does_not_cascade() {
    let app = TestApp::new();
    let token = app.register_and_login("rename@example.com").await;

    let notes = create_folder(&app, &token, "Notes", None).await;
    let notes_id = notes["id"].as_str().expect("id").to_string();
    let child = create_folder(&app, &token, "Child", Some(&notes_id)).await;

    let file = app
        .request(
            "POST",
            "/api/files",
            Some(json!({ "name": "a.md", "type": "markdown", "folderId": notes_id })),
            Some(&token),
        )
        .await;
    assert_eq!(file.data()["path"], "/Notes/a.md");

    let renamed = app
        .request(
            "PUT",
            "/api/folders",
            Some(json!({ "id": notes_id, "name": "Archive" })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["path"], "/Archive");

    let folders = app.request("GET", "/api/folders", None, Some(&token)).await;
    let stale_child = folders
        .data()
        .as_array()
        .expect("array")
        .iter()
        .find(|f| f["id"] == child["id"])
        .expect("child still listed");
    assert_eq!(stale_child["path"], "/Notes/Child");

    let file_id = file.data()["id"].as_str().expect("id");
    let file = app
        .request("GET", &format!("/api/files?id={file_id}"), None, Some(&token))
        .await;
    assert_eq!(file.data()["path"], "/Notes/a.md");
}

#[tokio::test]
async fn test_delete_removes_only_direct_files() {
    let app = TestApp::new();
    let token = app.register_and_login("delete@example.com").await;

    let top = create_folder(&app, &token, "Top", None).await;
    let top_id = top["id"].as_str().expect("id").to_string();
    let sub = create_folder(&app, &token, "Sub", Some(&top_id)).await;
    let sub_id = sub["id"].as_str().expect("id").to_string();

    for (name, folder) in [("direct.md", &top_id), ("nested.md", &sub_id)] {
        let response = app
            .request(
                "POST",
                "/api/files",
                Some(json!({ "name": name, "type": "markdown", "folderId": folder })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/folders?id={top_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.data()["filesRemoved"], 1);

    let folders = app.request("GET", "/api/folders", None, Some(&token)).await;
    let remaining: Vec<&str> = folders
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|f| f["path"].as_str())
        .collect();
    assert_eq!(remaining, vec!["/Top/Sub"]);

    let files = app.request("GET", "/api/files", None, Some(&token)).await;
    let names: Vec<&str> = files
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(names, vec!["nested.md"]);
}

#[tokio::test]
async fn test_delete_requires_id() {
    let app = TestApp::new();
    let token = app.register_and_login("noid@example.com").await;

    let missing = app
        .request("DELETE", "/api/folders", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .request("DELETE", "/api/folders?id=nope", None, Some(&token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_other_users_folders_are_invisible() {
    let app = TestApp::new();
    let alice = app.register_and_login("alice@example.com").await;
    let bob = app.register_and_login("bob@example.com").await;

    let private = create_folder(&app, &alice, "Private", None).await;
    let id = private["id"].as_str().expect("id");

    let list = app.request("GET", "/api/folders", None, Some(&bob)).await;
    assert_eq!(list.data(), &json!([]));

    let rename = app
        .request(
            "PUT",
            "/api/folders",
            Some(json!({ "id": id, "name": "Mine" })),
            Some(&bob),
        )
        .await;
    assert_eq!(rename.status, StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", &format!("/api/folders?id={id}"), None, Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    // Bob cannot nest under Alice's folder either.
    let nested = create_folder(&app, &bob, "Sneaky", Some(id)).await;
    assert_eq!(nested["path"], "/Sneaky");

    let list = app.request("GET", "/api/folders", None, Some(&alice)).await;
    assert_eq!(list.data()[0]["path"], "/Private");
    assert_eq!(list.data().as_array().expect("array").len(), 1);
}
