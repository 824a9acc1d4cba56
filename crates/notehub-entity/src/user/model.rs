//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered NoteHub user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash; empty for accounts created through GitHub sign-in.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub name: String,
    /// GitHub login, once the account has signed in through GitHub.
    pub github_username: Option<String>,
    /// Most recent GitHub OAuth access token.
    #[serde(skip_serializing)]
    pub github_access_token: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account can sign in with a password.
    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }

    /// Whether a GitHub access token is on record.
    pub fn is_github_linked(&self) -> bool {
        self.github_access_token.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address.
    pub email: String,
    /// Pre-hashed password (empty for OAuth-only accounts).
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// GitHub login and token when created from a GitHub sign-in.
    pub github: Option<GitHubLink>,
}

/// GitHub identity attached to a user on OAuth sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLink {
    /// GitHub login.
    pub username: String,
    /// OAuth access token.
    pub access_token: String,
}
