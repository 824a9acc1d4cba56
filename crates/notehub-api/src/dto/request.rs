//! Request DTOs with validation.
//!
//! Required text fields default to empty so that a missing field and a
//! blank one produce the same validation message.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use notehub_service::file::service::{CreateFileRequest, UpdateFileRequest};
use notehub_service::folder::service::CreateFolderRequest;
use notehub_service::github::repository::CreateRepositoryRequest;
use notehub_service::user::identity::{LoginRequest, RegisterRequest};

/// Turns a client-supplied container id into a lookup key.
///
/// A value that is not a UUID cannot name any folder, so it is treated
/// the same as an unknown one and the node lands at root.
fn container_id(raw: Option<String>) -> Option<Uuid> {
    let raw = raw.filter(|s| !s.is_empty())?;
    match Uuid::parse_str(&raw) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::debug!(value = %raw, "Ignoring malformed container id");
            None
        }
    }
}

/// Registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBody {
    /// Email.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
            name: body.name,
        }
    }
}

/// Credential login body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginBody {
    /// Email.
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter an email and password"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter an email and password"))]
    pub password: String,
}

impl From<LoginBody> for LoginRequest {
    fn from(body: LoginBody) -> Self {
        LoginRequest::Credentials {
            email: body.email,
            password: body.password,
        }
    }
}

/// Query string GitHub appends to the OAuth callback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code.
    pub code: Option<String>,
    /// State issued with the authorize URL.
    pub state: Option<String>,
    /// Set by GitHub when the user denied access.
    pub error: Option<String>,
}

/// Folder creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderBody {
    /// Folder name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder id; root when absent or unknown.
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl From<CreateFolderBody> for CreateFolderRequest {
    fn from(body: CreateFolderBody) -> Self {
        Self {
            name: body.name,
            parent_id: container_id(body.parent_id),
        }
    }
}

/// Folder rename body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderBody {
    /// Folder to rename.
    pub id: Uuid,
    /// New name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
}

/// File creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileBody {
    /// File name.
    #[serde(default)]
    #[validate(length(min = 1, message = "File name and type are required"))]
    pub name: String,
    /// `markdown` or `text`.
    #[serde(default, rename = "type")]
    #[validate(length(min = 1, message = "File name and type are required"))]
    pub file_type: String,
    /// Initial content.
    #[serde(default)]
    pub content: Option<String>,
    /// Containing folder; root when absent or unknown.
    #[serde(default)]
    pub folder_id: Option<String>,
}

impl From<CreateFileBody> for CreateFileRequest {
    fn from(body: CreateFileBody) -> Self {
        Self {
            name: body.name,
            file_type: body.file_type,
            content: body.content,
            folder_id: container_id(body.folder_id),
        }
    }
}

/// File save and/or rename body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFileBody {
    /// File to update.
    pub id: Uuid,
    /// Replacement content.
    #[serde(default)]
    pub content: Option<String>,
    /// New name.
    #[serde(default)]
    #[validate(length(min = 1, message = "File name cannot be empty"))]
    pub name: Option<String>,
}

impl UpdateFileBody {
    /// Splits off the service request.
    pub fn into_parts(self) -> (Uuid, UpdateFileRequest) {
        (
            self.id,
            UpdateFileRequest {
                content: self.content,
                name: self.name,
            },
        )
    }
}

/// Repository creation body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepositoryBody {
    /// Repository name.
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Repository name is required"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Private repository.
    #[serde(default)]
    pub is_private: Option<bool>,
}

impl From<CreateRepositoryBody> for CreateRepositoryRequest {
    fn from(body: CreateRepositoryBody) -> Self {
        Self {
            name: body.name,
            description: body.description,
            is_private: body.is_private,
        }
    }
}

/// Sync target.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SyncBody {
    /// Repository owner login.
    #[serde(default)]
    #[validate(length(min = 1, message = "Repository name and owner are required"))]
    pub repository_owner: String,
    /// Repository name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Repository name and owner are required"))]
    pub repository_name: String,
}
