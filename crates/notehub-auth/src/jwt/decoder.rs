//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::de::DeserializeOwned;
use tracing::debug;

use notehub_core::config::AuthConfig;
use notehub_core::error::AppError;

use super::claims::{Claims, StateClaims, TokenType};

/// Validates session and OAuth state tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token.
    pub fn decode_session(&self, token: &str) -> Result<Claims, AppError> {
        let claims: Claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Session {
            return Err(AppError::unauthorized(
                "Invalid token type: expected session token",
            ));
        }
        Ok(claims)
    }

    /// Checks that `state` is an unexpired state token signed by this server
    /// and bound to `nonce`, the value the browser kept from the authorize
    /// step.
    pub fn verify_oauth_state(&self, state: &str, nonce: &str) -> Result<(), AppError> {
        let claims: StateClaims = self
            .decode_token(state)
            .map_err(|_| AppError::unauthorized("Invalid OAuth state"))?;
        if claims.token_type != TokenType::OAuthState {
            return Err(AppError::unauthorized("Invalid OAuth state"));
        }
        if claims.nonce.to_string() != nonce {
            return Err(AppError::unauthorized(
                "OAuth state was not issued to this browser",
            ));
        }
        debug!(nonce = %claims.nonce, "OAuth state verified");
        Ok(())
    }

    fn decode_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, AppError> {
        let token_data = decode::<T>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::unauthorized("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized(format!("Token validation failed: {e}")),
            }
        })?;

        Ok(token_data.claims)
    }
}
