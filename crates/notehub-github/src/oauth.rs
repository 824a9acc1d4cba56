//! GitHub OAuth web flow: authorize URL and code exchange.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::warn;

use notehub_core::config::GitHubConfig;
use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;

use crate::client::upstream_error;
use crate::models::AccessToken;

/// Client for the OAuth application endpoints on the GitHub web host.
#[derive(Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    redirect_url: String,
    scopes: String,
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}

#[derive(Serialize)]
struct CodeExchange<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

/// The token endpoint answers 200 for both outcomes.
#[derive(Deserialize)]
#[serde(untagged)]
enum TokenResponse {
    Granted(AccessToken),
    Denied {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
}

impl OAuthClient {
    /// Build a client from configuration.
    pub fn new(config: &GitHubConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url: config.oauth_base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_url: config.redirect_url.clone(),
            scopes: config.scopes.clone(),
        })
    }

    /// URL of GitHub's consent page carrying `state`.
    pub fn authorize_url(&self, state: &str) -> AppResult<String> {
        let url = Url::parse_with_params(
            &format!("{}/login/oauth/authorize", self.base_url),
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_url.as_str()),
                ("scope", self.scopes.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid GitHub OAuth base URL", e)
        })?;
        Ok(url.to_string())
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> AppResult<AccessToken> {
        let action = "Failed to exchange OAuth code";
        let response = self
            .http
            .post(format!("{}/login/oauth/access_token", self.base_url))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&CodeExchange {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                code,
                redirect_uri: &self.redirect_url,
            })
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Upstream, action, e))?;

        if !response.status().is_success() {
            return Err(upstream_error(response, action).await);
        }

        let body = response.json::<TokenResponse>().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, format!("{action}: invalid response"), e)
        })?;

        match body {
            TokenResponse::Granted(token) => Ok(token),
            TokenResponse::Denied {
                error,
                error_description,
            } => {
                warn!(error = %error, "GitHub rejected the authorization code");
                Err(AppError::unauthorized("GitHub rejected the authorization code")
                    .with_details(serde_json::json!({
                        "error": error,
                        "error_description": error_description,
                    })))
            }
        }
    }
}
