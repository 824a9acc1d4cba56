//! File CRUD scoped to the requesting user.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use notehub_core::error::AppError;
use notehub_database::store::{FileStore, FolderStore};
use notehub_entity::file::{CreateFile, File, FileType, UpdateFile};
use notehub_entity::path::rename_last_segment;

use crate::context::RequestContext;
use crate::folder::placement::place;

/// PostgreSQL text columns cannot hold U+0000, so no store accepts it.
fn reject_nul(content: Option<&str>) -> Result<(), AppError> {
    match content {
        Some(text) if text.contains('\0') => Err(AppError::validation(
            "File content cannot contain NUL characters",
        )),
        _ => Ok(()),
    }
}

/// Handles file CRUD and content saves.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Folder store (for parent lookups).
    folders: Arc<dyn FolderStore>,
}

/// Request to create a new file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// File name, including extension.
    pub name: String,
    /// `"markdown"` or anything else for plain text.
    #[serde(rename = "type")]
    pub file_type: String,
    /// Initial content; empty when omitted.
    #[serde(default)]
    pub content: Option<String>,
    /// Containing folder.
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

/// Content save and/or rename of an existing file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFileRequest {
    /// Replacement content.
    #[serde(default)]
    pub content: Option<String>,
    /// New file name.
    #[serde(default)]
    pub name: Option<String>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, folders: Arc<dyn FolderStore>) -> Self {
        Self { files, folders }
    }

    /// Lists every file of the current user, ordered by path.
    pub async fn list_files(&self, ctx: &RequestContext) -> Result<Vec<File>, AppError> {
        self.files.list_by_owner(ctx.user_id).await
    }

    /// Gets a file by ID.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        self.files
            .find_by_id(ctx.user_id, file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Creates a new file, at root when `folder_id` does not resolve.
    pub async fn create_file(
        &self,
        ctx: &RequestContext,
        req: CreateFileRequest,
    ) -> Result<File, AppError> {
        if req.name.trim().is_empty() || req.file_type.trim().is_empty() {
            return Err(AppError::validation("File name and type are required"));
        }
        reject_nul(req.content.as_deref())?;

        let placement =
            place(self.folders.as_ref(), ctx.user_id, req.folder_id, &req.name).await?;

        let file = self
            .files
            .create(&CreateFile {
                owner_id: ctx.user_id,
                folder_id: placement.parent_id,
                name: req.name,
                content: req.content.unwrap_or_default(),
                file_type: FileType::from_request(&req.file_type),
                path: placement.path,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            path = %file.path,
            file_type = %file.file_type,
            "File created"
        );

        Ok(file)
    }

    /// Applies a content save and/or rename.
    ///
    /// A rename rewrites only the final path segment. Content is overwritten
    /// in full; concurrent saves resolve as last writer wins.
    pub async fn update_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        req: UpdateFileRequest,
    ) -> Result<File, AppError> {
        reject_nul(req.content.as_deref())?;
        let mut update = UpdateFile {
            content: req.content,
            ..Default::default()
        };

        if let Some(name) = req.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("File name cannot be empty"));
            }
            let current = self.get_file(ctx, file_id).await?;
            update.path = Some(rename_last_segment(&current.path, &name));
            update.name = Some(name);
        }

        let file = self
            .files
            .update(ctx.user_id, file_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if update.name.is_some() {
            info!(user_id = %ctx.user_id, file_id = %file_id, path = %file.path, "File renamed");
        } else {
            debug!(user_id = %ctx.user_id, file_id = %file_id, "File content saved");
        }

        Ok(file)
    }

    /// Overwrites a file's content.
    pub async fn update_file_content(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        content: String,
    ) -> Result<File, AppError> {
        self.update_file(
            ctx,
            file_id,
            UpdateFileRequest {
                content: Some(content),
                name: None,
            },
        )
        .await
    }

    /// Renames a file in place.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: String,
    ) -> Result<File, AppError> {
        self.update_file(
            ctx,
            file_id,
            UpdateFileRequest {
                content: None,
                name: Some(new_name),
            },
        )
        .await
    }

    /// Deletes a file.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<(), AppError> {
        if !self.files.delete(ctx.user_id, file_id).await? {
            return Err(AppError::not_found("File not found"));
        }
        info!(user_id = %ctx.user_id, file_id = %file_id, "File deleted");
        Ok(())
    }
}
