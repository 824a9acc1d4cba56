//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_entity::file::{CreateFile, File, UpdateFile};

use crate::store::FileStore;

/// Repository for the `files` table.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE for a byte sequence the column encoding cannot store (U+0000).
const UNTRANSLATABLE_CHARACTER: &str = "22021";

fn write_error(err: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNTRANSLATABLE_CHARACTER) {
            return AppError::validation("File content cannot contain NUL characters");
        }
    }
    AppError::with_source(ErrorKind::Database, message, err)
}

#[async_trait]
impl FileStore for FileRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 ORDER BY path COLLATE \"C\" ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (owner_id, folder_id, name, content, file_type, path) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(data.folder_id)
        .bind(&data.name)
        .bind(&data.content)
        .bind(data.file_type)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create file"))
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        data: &UpdateFile,
    ) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET \
                name = COALESCE($3, name), \
                path = COALESCE($4, path), \
                content = COALESCE($5, content), \
                updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(data.name.as_deref())
        .bind(data.path.as_deref())
        .bind(data.content.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update file"))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_folder(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE folder_id = $1 AND owner_id = $2")
            .bind(folder_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder files", e)
            })?;
        Ok(result.rows_affected())
    }
}
