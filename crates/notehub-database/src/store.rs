//! Store traits implemented by every backend.
//!
//! Folder and file operations take the owner id alongside the record id and
//! must filter on both, so a foreign record is indistinguishable from a
//! missing one.

use async_trait::async_trait;
use uuid::Uuid;

use notehub_core::result::AppResult;
use notehub_entity::file::{CreateFile, File, UpdateFile};
use notehub_entity::folder::{CreateFolder, Folder};
use notehub_entity::user::{CreateUser, User};

/// Access to the `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with a validation error on a duplicate email.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Store the GitHub login and access token on an existing user.
    async fn link_github(&self, id: Uuid, username: &str, access_token: &str)
    -> AppResult<User>;

    /// List every user, oldest first.
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Owner-scoped access to the `folders` collection.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// All folders of `owner_id`, ordered by path (byte-wise).
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Folder>>;

    /// A single folder, if it exists and belongs to `owner_id`.
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>>;

    /// Insert a new folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Set a new name and path. Returns `None` when nothing matched.
    async fn rename(
        &self,
        owner_id: Uuid,
        id: Uuid,
        name: &str,
        path: &str,
    ) -> AppResult<Option<Folder>>;

    /// Delete a folder. Returns `false` when nothing matched.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// Owner-scoped access to the `files` collection.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// All files of `owner_id`, ordered by path (byte-wise).
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<File>>;

    /// A single file, if it exists and belongs to `owner_id`.
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>>;

    /// Insert a new file.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Apply a partial update. Returns `None` when nothing matched.
    async fn update(&self, owner_id: Uuid, id: Uuid, data: &UpdateFile)
    -> AppResult<Option<File>>;

    /// Delete a file. Returns `false` when nothing matched.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool>;

    /// Delete every file whose folder id is `folder_id`. Returns the count.
    async fn delete_by_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<u64>;
}
