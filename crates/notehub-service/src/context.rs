//! Request context carrying the authenticated user and their GitHub token.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use notehub_core::error::AppError;

/// Context for the current authenticated request.
///
/// Built from the session token on every request and passed into service
/// methods, so each operation knows *who* is acting and whether it may call
/// GitHub on their behalf.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// GitHub OAuth access token from the session, if the user signed in
    /// through GitHub.
    pub github_token: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, github_token: Option<String>) -> Self {
        Self {
            user_id,
            github_token,
            request_time: Utc::now(),
        }
    }

    /// The GitHub token, or an unauthorized error when the session has none.
    pub fn require_github_token(&self) -> Result<&str, AppError> {
        self.github_token
            .as_deref()
            .ok_or_else(|| AppError::unauthorized("GitHub authentication required"))
    }
}
