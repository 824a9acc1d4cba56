//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Session token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Lifetime of the signed OAuth `state` parameter in minutes.
    #[serde(default = "default_oauth_state_ttl")]
    pub oauth_state_ttl_minutes: u64,
    /// Minimum password length for new credential accounts.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_hours: default_session_ttl(),
            oauth_state_ttl_minutes: default_oauth_state_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    720
}

fn default_oauth_state_ttl() -> u64 {
    10
}

fn default_password_min() -> usize {
    8
}
