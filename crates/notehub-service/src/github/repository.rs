//! Listing and creating the caller's GitHub repositories.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use notehub_core::error::AppError;
use notehub_github::GitHubClient;
use notehub_github::models::{CreateRepository, Repository};

use crate::context::RequestContext;

/// Repository fields exposed to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    /// GitHub's numeric repository id.
    pub id: u64,
    /// Repository name without the owner.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
    /// Owner login.
    pub owner: String,
    /// Whether the repository is private.
    pub private: bool,
    /// Description, when set.
    pub description: Option<String>,
    /// Web URL of the repository.
    pub url: String,
}

impl From<Repository> for RepositorySummary {
    fn from(repo: Repository) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            owner: repo.owner.login,
            private: repo.private,
            description: repo.description,
            url: repo.html_url,
        }
    }
}

/// Request to create a repository to sync into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepositoryRequest {
    /// Repository name.
    pub name: String,
    /// Description; the configured default when omitted or empty.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the repository is private (public when omitted).
    #[serde(default)]
    pub is_private: Option<bool>,
}

/// Repository operations on behalf of the signed-in GitHub user.
#[derive(Debug, Clone)]
pub struct RepositoryService {
    github: Arc<GitHubClient>,
    default_description: String,
}

impl RepositoryService {
    /// Creates a new repository service.
    pub fn new(github: Arc<GitHubClient>, default_description: impl Into<String>) -> Self {
        Self {
            github,
            default_description: default_description.into(),
        }
    }

    /// The caller's repositories, most recently updated first.
    pub async fn list_repositories(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<RepositorySummary>, AppError> {
        let token = ctx.require_github_token()?;
        let repos = self.github.list_repositories(token).await?;
        Ok(repos.into_iter().map(RepositorySummary::from).collect())
    }

    /// Creates an auto-initialized repository.
    pub async fn create_repository(
        &self,
        ctx: &RequestContext,
        req: CreateRepositoryRequest,
    ) -> Result<RepositorySummary, AppError> {
        let token = ctx.require_github_token()?;
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Repository name is required"));
        }

        let body = CreateRepository {
            name: req.name,
            description: req
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| self.default_description.clone()),
            private: req.is_private.unwrap_or(false),
            auto_init: true,
        };

        let repo = self.github.create_repository(token, &body).await?;
        info!(user_id = %ctx.user_id, repository = %repo.full_name, "Repository created");

        Ok(repo.into())
    }
}
