//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::FileType;

/// A note stored in NoteHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file owner.
    pub owner_id: Uuid,
    /// The folder containing this file (None at root).
    pub folder_id: Option<Uuid>,
    /// The file name (including extension).
    pub name: String,
    /// Raw UTF-8 content.
    pub content: String,
    /// How the editor should treat the content.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Materialized path (e.g., `/Notes/a.md`).
    pub path: String,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// The path used for this file inside a git tree (no leading slash).
    pub fn repository_path(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file owner.
    pub owner_id: Uuid,
    /// The folder to place the file in.
    pub folder_id: Option<Uuid>,
    /// The file name.
    pub name: String,
    /// Initial content.
    pub content: String,
    /// Content type.
    pub file_type: FileType,
    /// Materialized path.
    pub path: String,
}

/// Partial update applied to an existing file.
///
/// `None` fields are left untouched. `path` accompanies `name` on rename.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFile {
    /// New file name.
    pub name: Option<String>,
    /// New materialized path.
    pub path: Option<String>,
    /// Replacement content (full overwrite).
    pub content: Option<String>,
}
