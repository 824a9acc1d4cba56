//! PostgreSQL connection pool for the document store.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use notehub_core::config::DatabaseConfig;
use notehub_core::error::{AppError, ErrorKind};

/// Pooled PostgreSQL connections.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool against `config.url`.
    ///
    /// A malformed URL is a configuration error; an unreachable server is a
    /// database error.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let masked = mask_password(&config.url);

        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid database URL '{masked}'"),
                    e,
                )
            })?
            .application_name("notehub");

        info!(
            url = %masked,
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL store"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to {masked}"),
                    e,
                )
            })?;

        info!(url = %masked, "Connected to PostgreSQL store");
        Ok(Self { pool })
    }

    /// The underlying sqlx pool, shared by the repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Store health check failed", e))?;
        Ok(one == 1)
    }

    /// Wait for in-flight queries and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL store closed");
    }
}

/// Replace the password in a connection URL with `****`.
pub fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    match url[scheme_end..at_pos].find(':') {
        Some(offset) => {
            let colon_pos = scheme_end + offset;
            format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..])
        }
        None => url.to_string(),
    }
}
