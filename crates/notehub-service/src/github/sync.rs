//! Pushes a user's whole file set to a GitHub repository as one commit.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info};

use notehub_core::error::AppError;
use notehub_database::store::FileStore;
use notehub_entity::file::File;
use notehub_github::GitHubClient;
use notehub_github::models::{CreateCommit, CreateRef, CreateTree, TreeEntry, UpdateRef};

use crate::context::RequestContext;

/// Branch used when the repository does not report a default branch.
const FALLBACK_BRANCH: &str = "main";

/// Result of a successful sync.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    /// The commit the branch now points at.
    pub commit_sha: String,
    /// Number of files written.
    pub files_count: usize,
    /// Branch that was moved or created.
    pub branch: String,
}

/// Replays the stored file set onto a repository through the git data API.
#[derive(Debug, Clone)]
pub struct SyncService {
    files: Arc<dyn FileStore>,
    github: Arc<GitHubClient>,
    commit_message_prefix: String,
}

impl SyncService {
    /// Creates a new sync service.
    pub fn new(
        files: Arc<dyn FileStore>,
        github: Arc<GitHubClient>,
        commit_message_prefix: impl Into<String>,
    ) -> Self {
        Self {
            files,
            github,
            commit_message_prefix: commit_message_prefix.into(),
        }
    }

    /// Commits every file of the current user to the default branch of
    /// `owner/repo`.
    ///
    /// Files overwrite matching paths on top of the existing tree; nothing
    /// on the remote is deleted. The first sync to an empty branch creates a
    /// root commit. The branch is moved without force, and any remote
    /// failure aborts the sequence with the remote status and body.
    pub async fn sync_all(
        &self,
        ctx: &RequestContext,
        owner: &str,
        repo: &str,
    ) -> Result<SyncOutcome, AppError> {
        let token = ctx.require_github_token()?;
        if owner.trim().is_empty() || repo.trim().is_empty() {
            return Err(AppError::validation(
                "Repository name and owner are required",
            ));
        }

        let files = self.files.list_by_owner(ctx.user_id).await?;
        let entries = tree_entries(&files);

        let repository = self.github.get_repository(token, owner, repo).await?;
        let branch = repository
            .default_branch
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| FALLBACK_BRANCH.to_string());

        let head = self
            .github
            .get_branch_ref(token, owner, repo, &branch)
            .await?;

        let (parent_sha, base_tree) = match &head {
            Some(head) => {
                let commit = self
                    .github
                    .get_commit(token, owner, repo, &head.object.sha)
                    .await?;
                (Some(head.object.sha.clone()), Some(commit.tree.sha))
            }
            None => {
                debug!(owner, repo, branch = %branch, "Branch has no commits yet");
                (None, None)
            }
        };

        let tree = self
            .github
            .create_tree(
                token,
                owner,
                repo,
                &CreateTree {
                    tree: entries,
                    base_tree,
                },
            )
            .await?;

        let commit = self
            .github
            .create_commit(
                token,
                owner,
                repo,
                &CreateCommit {
                    message: self.commit_message(),
                    tree: tree.sha,
                    parents: parent_sha.into_iter().collect(),
                },
            )
            .await?;

        if head.is_some() {
            self.github
                .update_branch_ref(
                    token,
                    owner,
                    repo,
                    &branch,
                    &UpdateRef {
                        sha: commit.sha.clone(),
                        force: false,
                    },
                )
                .await?;
        } else {
            self.github
                .create_ref(
                    token,
                    owner,
                    repo,
                    &CreateRef {
                        ref_name: format!("refs/heads/{branch}"),
                        sha: commit.sha.clone(),
                    },
                )
                .await?;
        }

        info!(
            user_id = %ctx.user_id,
            repository = %format!("{owner}/{repo}"),
            branch = %branch,
            commit_sha = %commit.sha,
            files = files.len(),
            "Files synced to GitHub"
        );

        Ok(SyncOutcome {
            commit_sha: commit.sha,
            files_count: files.len(),
            branch,
        })
    }

    fn commit_message(&self) -> String {
        format!(
            "{} - {}",
            self.commit_message_prefix,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// One blob entry per file, keyed by its path without the leading slash.
fn tree_entries(files: &[File]) -> Vec<TreeEntry> {
    files
        .iter()
        .map(|f| TreeEntry::blob(f.repository_path(), f.content.clone()))
        .collect()
}
