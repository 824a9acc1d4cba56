//! REST client for the GitHub API.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use notehub_core::config::GitHubConfig;
use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;

use crate::models::{
    CreateCommit, CreateRef, CreateRepository, CreateTree, GitCommit, GitHubEmail, GitHubUser,
    GitRef, GitTree, Repository, UpdateRef,
};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Calls the GitHub REST API on behalf of a user.
///
/// The client holds no credentials; every call takes the caller's OAuth
/// access token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
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
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.bearer_auth(token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        token: &str,
        action: &str,
    ) -> AppResult<T> {
        let response = self.send(req, token, action).await?;
        if !response.status().is_success() {
            return Err(upstream_error(response, action).await);
        }
        response.json::<T>().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, format!("{action}: invalid response"), e)
        })
    }

    async fn send(&self, req: RequestBuilder, token: &str, action: &str) -> AppResult<Response> {
        let response = self
            .authorized(req, token)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Upstream, action.to_string(), e))?;
        debug!(status = response.status().as_u16(), action, "GitHub responded");
        Ok(response)
    }

    /// `GET /repos/{owner}/{repo}`
    pub async fn get_repository(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> AppResult<Repository> {
        let url = self.url(&format!("/repos/{owner}/{repo}"));
        self.send_json(self.http.get(url), token, "Failed to fetch repository")
            .await
    }

    /// `GET /user/repos`, most recently updated first, first page of 100.
    pub async fn list_repositories(&self, token: &str) -> AppResult<Vec<Repository>> {
        let url = self.url("/user/repos?sort=updated&per_page=100");
        self.send_json(self.http.get(url), token, "Failed to fetch repositories")
            .await
    }

    /// `POST /user/repos`
    pub async fn create_repository(
        &self,
        token: &str,
        body: &CreateRepository,
    ) -> AppResult<Repository> {
        let url = self.url("/user/repos");
        self.send_json(self.http.post(url).json(body), token, "Failed to create repository")
            .await
    }

    /// `GET /repos/{owner}/{repo}/git/refs/heads/{branch}`.
    ///
    /// Returns `None` when the branch has no commit yet, which GitHub
    /// reports as 404, or as 409 for a repository with no commits at all.
    pub async fn get_branch_ref(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> AppResult<Option<GitRef>> {
        let url = self.url(&format!("/repos/{owner}/{repo}/git/refs/heads/{branch}"));
        let action = "Failed to fetch reference";
        let response = self.send(self.http.get(url), token, action).await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::CONFLICT => Ok(None),
            status if status.is_success() => {
                let git_ref = response.json::<GitRef>().await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Upstream,
                        format!("{action}: invalid response"),
                        e,
                    )
                })?;
                Ok(Some(git_ref))
            }
            _ => Err(upstream_error(response, action).await),
        }
    }

    /// `GET /repos/{owner}/{repo}/git/commits/{sha}`
    pub async fn get_commit(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> AppResult<GitCommit> {
        let url = self.url(&format!("/repos/{owner}/{repo}/git/commits/{sha}"));
        self.send_json(self.http.get(url), token, "Failed to fetch commit")
            .await
    }

    /// `POST /repos/{owner}/{repo}/git/trees`
    pub async fn create_tree(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        body: &CreateTree,
    ) -> AppResult<GitTree> {
        let url = self.url(&format!("/repos/{owner}/{repo}/git/trees"));
        self.send_json(self.http.post(url).json(body), token, "Failed to create tree")
            .await
    }

    /// `POST /repos/{owner}/{repo}/git/commits`
    pub async fn create_commit(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        body: &CreateCommit,
    ) -> AppResult<GitCommit> {
        let url = self.url(&format!("/repos/{owner}/{repo}/git/commits"));
        self.send_json(self.http.post(url).json(body), token, "Failed to create commit")
            .await
    }

    /// `PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}`
    pub async fn update_branch_ref(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        branch: &str,
        body: &UpdateRef,
    ) -> AppResult<GitRef> {
        let url = self.url(&format!("/repos/{owner}/{repo}/git/refs/heads/{branch}"));
        self.send_json(self.http.patch(url).json(body), token, "Failed to update reference")
            .await
    }

    /// `POST /repos/{owner}/{repo}/git/refs`
    pub async fn create_ref(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        body: &CreateRef,
    ) -> AppResult<GitRef> {
        let url = self.url(&format!("/repos/{owner}/{repo}/git/refs"));
        self.send_json(self.http.post(url).json(body), token, "Failed to create reference")
            .await
    }

    /// `GET /user`
    pub async fn get_authenticated_user(&self, token: &str) -> AppResult<GitHubUser> {
        let url = self.url("/user");
        self.send_json(self.http.get(url), token, "Failed to fetch GitHub profile")
            .await
    }

    /// `GET /user/emails`
    pub async fn list_emails(&self, token: &str) -> AppResult<Vec<GitHubEmail>> {
        let url = self.url("/user/emails");
        self.send_json(self.http.get(url), token, "Failed to fetch GitHub emails")
            .await
    }
}

/// Turn a non-success response into an upstream error carrying the status
/// and the remote body. Bodies that are not JSON are wrapped as
/// `{"message": <text>}`.
pub(crate) async fn upstream_error(response: Response, action: &str) -> AppError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let details = serde_json::from_str::<serde_json::Value>(&text)
        .unwrap_or_else(|_| serde_json::json!({ "message": text }));
    AppError::upstream(status, action, Some(details))
}
