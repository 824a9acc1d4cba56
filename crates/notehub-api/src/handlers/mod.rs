//! Route handlers organized by domain.

pub mod auth;
pub mod file;
pub mod folder;
pub mod github;
pub mod health;
