//! Schema migrations embedded from the workspace `migrations/` directory.

use tracing::info;

use notehub_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

/// Apply every pending migration to the store behind `db`.
pub async fn run_migrations(db: &DatabasePool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(available = migrator.iter().count(), "Applying schema migrations");

    migrator.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Schema is up to date");
    Ok(())
}
