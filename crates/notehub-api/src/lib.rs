//! # notehub-api
//!
//! HTTP API layer for NoteHub built on Axum.
//!
//! Provides the REST endpoints under `/api`, middleware (CORS, request
//! logging), extractors, DTOs, and the mapping from [`AppError`] to JSON
//! error responses.
//!
//! [`AppError`]: notehub_core::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
