//! Store selection from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use notehub_core::config::DatabaseConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration;
use crate::repositories::{FileRepository, FolderRepository, UserRepository};
use crate::store::{FileStore, FolderStore, UserStore};

/// Handles to the three collections, backed by whichever provider the
/// configuration names.
#[derive(Debug, Clone)]
pub struct Stores {
    /// The `users` collection.
    pub users: Arc<dyn UserStore>,
    /// The `folders` collection.
    pub folders: Arc<dyn FolderStore>,
    /// The `files` collection.
    pub files: Arc<dyn FileStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Open the configured provider, applying migrations when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL store provider");
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    migration::run_migrations(&db).await?;
                }
                Ok(Self::postgres(db))
            }
            "memory" => {
                warn!("Using the in-memory store provider; data is lost when the process exits");
                Ok(Self::memory(MemoryStore::new()))
            }
            other => Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Build stores over an open PostgreSQL pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            folders: Arc::new(FolderRepository::new(pool.clone())),
            files: Arc::new(FileRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Build stores over a shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            folders: Arc::new(store.clone()),
            files: Arc::new(store),
            pool: None,
        }
    }

    /// Name of the active provider.
    pub fn provider_name(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check that the backing store answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(true),
        }
    }

    /// Release pooled connections, if any.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
