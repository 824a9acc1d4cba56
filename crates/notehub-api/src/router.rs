//! Route definitions for the NoteHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` router with every route bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(folder_routes())
        .merge(github_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Registration, login, GitHub OAuth and the current session
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/github", get(handlers::auth::github_authorize))
        .route(
            "/auth/github/callback",
            get(handlers::auth::github_callback),
        )
        .route("/auth/session", get(handlers::auth::session))
}

/// File CRUD; single-file operations take the id as `?id=` or in the body
fn file_routes() -> Router<AppState> {
    Router::new().route(
        "/files",
        get(handlers::file::get_files)
            .post(handlers::file::create_file)
            .put(handlers::file::update_file)
            .delete(handlers::file::delete_file),
    )
}

/// Folder CRUD
fn folder_routes() -> Router<AppState> {
    Router::new().route(
        "/folders",
        get(handlers::folder::list_folders)
            .post(handlers::folder::create_folder)
            .put(handlers::folder::rename_folder)
            .delete(handlers::folder::delete_folder),
    )
}

/// Repository management and sync (require a GitHub-linked session)
fn github_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/github/repos",
            get(handlers::github::list_repositories).post(handlers::github::create_repository),
        )
        .route("/github/sync", post(handlers::github::sync))
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
