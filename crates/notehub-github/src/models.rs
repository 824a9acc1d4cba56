//! Request and response bodies exchanged with the GitHub API.

use serde::{Deserialize, Serialize};

/// File mode for a regular, non-executable blob.
pub const BLOB_MODE: &str = "100644";

/// A repository as returned by `/repos/{owner}/{repo}` and `/user/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: RepositoryOwner,
    pub private: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Owner block nested in [`Repository`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// Body of `POST /user/repos`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepository {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
}

/// A named reference such as `refs/heads/main`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub object: GitObject,
}

/// The object a ref points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/git/refs`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
}

/// Body of `PATCH /repos/{owner}/{repo}/git/refs/heads/{branch}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRef {
    pub sha: String,
    pub force: bool,
}

/// A commit from the git data API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitCommit {
    pub sha: String,
    pub tree: ShaRef,
    #[serde(default)]
    pub parents: Vec<ShaRef>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Any `{ "sha": ... }` pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaRef {
    pub sha: String,
}

/// Body of `POST /repos/{owner}/{repo}/git/commits`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCommit {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

/// One entry of a tree being created. Content is sent inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl TreeEntry {
    /// A regular file entry at `path` holding `content`.
    pub fn blob(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: BLOB_MODE.to_string(),
            kind: "blob".to_string(),
            content: content.into(),
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/git/trees`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTree {
    pub tree: Vec<TreeEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_tree: Option<String>,
}

/// A created tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitTree {
    pub sha: String,
}

/// The authenticated user (`GET /user`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One address from `GET /user/emails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubEmail {
    pub email: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub verified: bool,
}

/// Successful answer of the OAuth token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}
