//! Folder CRUD scoped to the requesting user.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use notehub_core::error::AppError;
use notehub_database::store::{FileStore, FolderStore};
use notehub_entity::folder::{CreateFolder, Folder};
use notehub_entity::path::rename_last_segment;

use super::placement::place;
use crate::context::RequestContext;

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store, for removing a folder's direct files.
    files: Arc<dyn FileStore>,
}

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<dyn FolderStore>, files: Arc<dyn FileStore>) -> Self {
        Self { folders, files }
    }

    /// Lists every folder of the current user, ordered by path.
    pub async fn list_folders(&self, ctx: &RequestContext) -> Result<Vec<Folder>, AppError> {
        self.folders.list_by_owner(ctx.user_id).await
    }

    /// Gets a folder by ID.
    pub async fn get_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Folder, AppError> {
        self.folders
            .find_by_id(ctx.user_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Creates a new folder.
    ///
    /// An unknown or foreign `parent_id` is not an error: the folder is
    /// created at root instead.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<Folder, AppError> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Folder name is required"));
        }

        let placement =
            place(self.folders.as_ref(), ctx.user_id, req.parent_id, &req.name).await?;

        let folder = self
            .folders
            .create(&CreateFolder {
                owner_id: ctx.user_id,
                parent_id: placement.parent_id,
                name: req.name,
                path: placement.path,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder. Only the folder's own path changes; descendants
    /// keep the paths they were created with.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> Result<Folder, AppError> {
        if new_name.trim().is_empty() {
            return Err(AppError::validation("Folder name is required"));
        }

        let folder = self.get_folder(ctx, folder_id).await?;
        let new_path = rename_last_segment(&folder.path, new_name);

        let renamed = self
            .folders
            .rename(ctx.user_id, folder_id, new_name, &new_path)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            old_path = %folder.path,
            path = %renamed.path,
            "Folder renamed"
        );

        Ok(renamed)
    }

    /// Deletes a folder and the files directly inside it.
    ///
    /// Child folders and their files are left in place. Returns the number
    /// of files removed.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<u64, AppError> {
        if !self.folders.delete(ctx.user_id, folder_id).await? {
            return Err(AppError::not_found("Folder not found"));
        }

        let files_removed = self.files.delete_by_folder(ctx.user_id, folder_id).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            files_removed,
            "Folder deleted"
        );

        Ok(files_removed)
    }
}
