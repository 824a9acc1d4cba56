//! JWT token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use notehub_core::config::AuthConfig;
use notehub_core::error::AppError;

use super::claims::{Claims, StateClaims, TokenType};

/// Signs session and OAuth state tokens with HS256.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session lifetime.
    session_ttl: Duration,
    /// OAuth state lifetime.
    state_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("session_ttl", &self.session_ttl)
            .field("state_ttl", &self.state_ttl)
            .finish()
    }
}

/// A freshly issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// A freshly issued OAuth `state` and the nonce it is bound to.
///
/// The nonce goes to the browser in a cookie; the callback must present
/// both.
#[derive(Debug, Clone)]
pub struct OAuthState {
    /// The encoded JWT passed to GitHub as `state`.
    pub token: String,
    /// Value the browser has to send back.
    pub nonce: String,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            session_ttl: Duration::hours(config.session_ttl_hours as i64),
            state_ttl: Duration::minutes(config.oauth_state_ttl_minutes as i64),
        }
    }

    /// Issues a session token for `user_id`, embedding the GitHub token if given.
    pub fn issue_session(
        &self,
        user_id: Uuid,
        github_token: Option<&str>,
    ) -> Result<SessionToken, AppError> {
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        let claims = Claims {
            sub: user_id,
            gh: github_token.map(str::to_string),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            token_type: TokenType::Session,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(SessionToken { token, expires_at })
    }

    /// Issues a short-lived token used as the OAuth `state` parameter.
    pub fn issue_oauth_state(&self) -> Result<OAuthState, AppError> {
        let now = Utc::now();
        let nonce = Uuid::new_v4();
        let claims = StateClaims {
            nonce,
            iat: now.timestamp(),
            exp: (now + self.state_ttl).timestamp(),
            token_type: TokenType::OAuthState,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode OAuth state: {e}")))?;

        Ok(OAuthState {
            token,
            nonce: nonce.to_string(),
        })
    }
}
