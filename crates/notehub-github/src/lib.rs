//! # notehub-github
//!
//! Typed access to the parts of the GitHub API NoteHub talks to:
//! repositories, the git data API (refs, commits, trees), the OAuth web
//! flow and the authenticated user's profile.
//!
//! Base URLs come from [`GitHubConfig`](notehub_core::config::GitHubConfig)
//! so tests can point both clients at a mock server.

pub mod client;
pub mod models;
pub mod oauth;

pub use client::GitHubClient;
pub use oauth::OAuthClient;
