//! JWT claims carried by session and OAuth state tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token payload.
///
/// The GitHub access token rides along in `gh`. The token is signed, not
/// encrypted, so anyone holding it can read the provider token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: Uuid,
    /// GitHub OAuth access token, when the session came from GitHub sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gh: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Always [`TokenType::Session`].
    pub token_type: TokenType,
}

/// Payload of the `state` parameter round-tripped through GitHub's
/// authorize page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateClaims {
    /// Random value making every state distinct.
    pub nonce: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Always [`TokenType::OAuthState`].
    pub token_type: TokenType,
}

/// Distinguishes the two kinds of token signed with the same secret.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Bearer token for API requests.
    Session,
    /// OAuth `state` parameter.
    OAuthState,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the GitHub access token, if present.
    pub fn github_token(&self) -> Option<&str> {
        self.gh.as_deref()
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
