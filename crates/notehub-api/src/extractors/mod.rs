//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod query;

pub use auth::AuthUser;
pub use json::ValidatedJson;
pub use query::{IdQuery, ValidatedQuery};
