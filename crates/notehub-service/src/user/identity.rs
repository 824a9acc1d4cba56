//! Registration and the two sign-in flows: email/password and GitHub OAuth.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use notehub_auth::jwt::{JwtDecoder, JwtEncoder};
use notehub_auth::password::{PasswordHasher, PasswordValidator};
use notehub_core::error::AppError;
use notehub_database::store::UserStore;
use notehub_entity::user::{CreateUser, GitHubLink, User};
use notehub_github::models::GitHubUser;
use notehub_github::{GitHubClient, OAuthClient};

/// Request to register a credentials account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address, used as the login.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name; defaults to the email.
    #[serde(default)]
    pub name: Option<String>,
}

/// A sign-in attempt, resolved once at the HTTP boundary.
#[derive(Debug, Clone)]
pub enum LoginRequest {
    /// Email and password.
    Credentials {
        /// Account email.
        email: String,
        /// Plaintext password.
        password: String,
    },
    /// GitHub OAuth callback parameters.
    GitHub {
        /// Authorization code returned by GitHub.
        code: String,
        /// The `state` value issued by [`IdentityService::github_authorize`].
        state: String,
        /// Nonce the browser kept from the authorize step.
        nonce: String,
    },
}

/// Outcome of a successful sign-in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: User,
}

/// Where to send the browser to start GitHub sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizeRedirect {
    /// GitHub's consent page.
    pub url: String,
    /// The signed state embedded in `url`.
    pub state: String,
    /// Binds `state` to the browser; delivered as a cookie, never in the body.
    #[serde(skip)]
    pub nonce: String,
}

/// Verifies who a caller is and issues session tokens.
#[derive(Debug, Clone)]
pub struct IdentityService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    oauth: Arc<OAuthClient>,
    github: Arc<GitHubClient>,
}

impl IdentityService {
    /// Creates a new identity service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        oauth: Arc<OAuthClient>,
        github: Arc<GitHubClient>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
            decoder,
            oauth,
            github,
        }
    }

    /// Registers a new credentials account.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        if req.email.trim().is_empty() || req.password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }
        self.validator.validate(&req.password)?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::validation("User already exists"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let name = req
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| req.email.clone());

        let user = self
            .users
            .create(&CreateUser {
                email: req.email,
                password_hash,
                name,
                github: None,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Signs a user in and issues a session token.
    pub async fn login(&self, req: LoginRequest) -> Result<SessionGrant, AppError> {
        match req {
            LoginRequest::Credentials { email, password } => {
                self.login_with_credentials(&email, &password).await
            }
            LoginRequest::GitHub { code, state, nonce } => {
                self.login_with_github(&code, &state, &nonce).await
            }
        }
    }

    /// Builds the GitHub consent URL with a fresh signed state.
    pub fn github_authorize(&self) -> Result<AuthorizeRedirect, AppError> {
        let state = self.encoder.issue_oauth_state()?;
        let url = self.oauth.authorize_url(&state.token)?;
        Ok(AuthorizeRedirect {
            url,
            state: state.token,
            nonce: state.nonce,
        })
    }

    async fn login_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionGrant, AppError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("Please enter an email and password"));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        // Accounts created through GitHub have no password.
        if !user.has_password() || !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Credential login rejected");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let session = self.encoder.issue_session(user.id, None)?;
        info!(user_id = %user.id, "User logged in with credentials");

        Ok(SessionGrant {
            token: session.token,
            expires_at: session.expires_at,
            user,
        })
    }

    async fn login_with_github(
        &self,
        code: &str,
        state: &str,
        nonce: &str,
    ) -> Result<SessionGrant, AppError> {
        if code.is_empty() {
            return Err(AppError::validation("Missing OAuth code"));
        }
        self.decoder.verify_oauth_state(state, nonce)?;

        let token = self.oauth.exchange_code(code).await?.access_token;
        let profile = self.github.get_authenticated_user(&token).await?;
        let email = self.resolve_email(&token, &profile).await?;

        let user = match self.users.find_by_email(&email).await? {
            Some(existing) => {
                let user = self
                    .users
                    .link_github(existing.id, &profile.login, &token)
                    .await?;
                info!(user_id = %user.id, github = %profile.login, "GitHub token refreshed");
                user
            }
            None => {
                let user = self
                    .users
                    .create(&CreateUser {
                        email,
                        password_hash: String::new(),
                        name: profile
                            .name
                            .clone()
                            .filter(|n| !n.is_empty())
                            .unwrap_or_else(|| profile.login.clone()),
                        github: Some(GitHubLink {
                            username: profile.login.clone(),
                            access_token: token.clone(),
                        }),
                    })
                    .await?;
                info!(user_id = %user.id, github = %profile.login, "User created from GitHub");
                user
            }
        };

        let session = self.encoder.issue_session(user.id, Some(&token))?;

        Ok(SessionGrant {
            token: session.token,
            expires_at: session.expires_at,
            user,
        })
    }

    /// The profile email, or the primary verified address when the profile
    /// keeps it private.
    async fn resolve_email(&self, token: &str, profile: &GitHubUser) -> Result<String, AppError> {
        if let Some(email) = profile.email.as_deref().filter(|e| !e.is_empty()) {
            return Ok(email.to_string());
        }

        self.github
            .list_emails(token)
            .await?
            .into_iter()
            .find(|e| e.primary && e.verified)
            .map(|e| e.email)
            .ok_or_else(|| AppError::validation("GitHub account has no verified primary email"))
    }
}
