//! GitHub OAuth application and REST API configuration.

use serde::{Deserialize, Serialize};

/// Settings for talking to GitHub.
///
/// Both base URLs are configurable so that tests and GitHub Enterprise
/// installations can point the client elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL hosting `/login/oauth/authorize` and `/login/oauth/access_token`.
    #[serde(default = "default_oauth_base_url")]
    pub oauth_base_url: String,
    /// OAuth application client ID.
    #[serde(default)]
    pub client_id: String,
    /// OAuth application client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Callback URL registered with the OAuth application.
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
    /// Space-separated OAuth scopes requested at sign-in.
    #[serde(default = "default_scopes")]
    pub scopes: String,
    /// `User-Agent` header sent with every request (GitHub rejects requests without one).
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Prefix of the commit message created by a sync.
    #[serde(default = "default_commit_message_prefix")]
    pub commit_message_prefix: String,
    /// Description used when creating a repository without one.
    #[serde(default = "default_repository_description")]
    pub default_repository_description: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            oauth_base_url: default_oauth_base_url(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_url: default_redirect_url(),
            scopes: default_scopes(),
            user_agent: default_user_agent(),
            commit_message_prefix: default_commit_message_prefix(),
            default_repository_description: default_repository_description(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_oauth_base_url() -> String {
    "https://github.com".to_string()
}

fn default_redirect_url() -> String {
    "http://localhost:3000/api/auth/github/callback".to_string()
}

fn default_scopes() -> String {
    "read:user user:email repo".to_string()
}

fn default_user_agent() -> String {
    "notehub".to_string()
}

fn default_commit_message_prefix() -> String {
    "Sync from notehub".to_string()
}

fn default_repository_description() -> String {
    "Synced from notehub".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
