//! In-memory implementation of every store trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_entity::file::{CreateFile, File, UpdateFile};
use notehub_entity::folder::{CreateFolder, Folder};
use notehub_entity::user::{CreateUser, User};

use crate::store::{FileStore, FolderStore, UserStore};

/// Users, folders and files held in concurrent maps keyed by id.
///
/// Cloning shares the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<Uuid, User>>,
    folders: Arc<DashMap<Uuid, Folder>>,
    files: Arc<DashMap<Uuid, File>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        if self.users.iter().any(|u| u.email == data.email) {
            return Err(AppError::validation("User already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            name: data.name.clone(),
            github_username: data.github.as_ref().map(|g| g.username.clone()),
            github_access_token: data.github.as_ref().map(|g| g.access_token.clone()),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn link_github(
        &self,
        id: Uuid,
        username: &str,
        access_token: &str,
    ) -> AppResult<User> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.github_username = Some(username.to_string());
        user.github_access_token = Some(access_token.to_string());
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        let mut folders: Vec<Folder> = self
            .folders
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.value().clone())
            .collect();
        folders.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(folders)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self
            .folders
            .get(&id)
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.clone()))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            parent_id: data.parent_id,
            name: data.name.clone(),
            path: data.path.clone(),
            created_at: now,
            updated_at: now,
        };
        self.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn rename(
        &self,
        owner_id: Uuid,
        id: Uuid,
        name: &str,
        path: &str,
    ) -> AppResult<Option<Folder>> {
        let Some(mut folder) = self.folders.get_mut(&id) else {
            return Ok(None);
        };
        if folder.owner_id != owner_id {
            return Ok(None);
        }
        folder.name = name.to_string();
        folder.path = path.to_string();
        folder.updated_at = Utc::now();
        Ok(Some(folder.clone()))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        Ok(self
            .folders
            .remove_if(&id, |_, f| f.owner_id == owner_id)
            .is_some())
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        let mut files: Vec<File> = self
            .files
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.value().clone())
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        Ok(self
            .files
            .get(&id)
            .filter(|f| f.owner_id == owner_id)
            .map(|f| f.clone()))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let now = Utc::now();
        let file = File {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            folder_id: data.folder_id,
            name: data.name.clone(),
            content: data.content.clone(),
            file_type: data.file_type,
            path: data.path.clone(),
            created_at: now,
            updated_at: now,
        };
        self.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        data: &UpdateFile,
    ) -> AppResult<Option<File>> {
        let Some(mut file) = self.files.get_mut(&id) else {
            return Ok(None);
        };
        if file.owner_id != owner_id {
            return Ok(None);
        }
        if let Some(name) = &data.name {
            file.name = name.clone();
        }
        if let Some(path) = &data.path {
            file.path = path.clone();
        }
        if let Some(content) = &data.content {
            file.content = content.clone();
        }
        file.updated_at = Utc::now();
        Ok(Some(file.clone()))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        Ok(self
            .files
            .remove_if(&id, |_, f| f.owner_id == owner_id)
            .is_some())
    }

    async fn delete_by_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<u64> {
        let before = self.files.len();
        self.files
            .retain(|_, f| !(f.owner_id == owner_id && f.folder_id == Some(folder_id)));
        Ok(before.saturating_sub(self.files.len()) as u64)
    }
}
