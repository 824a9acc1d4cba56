//! Database migration management commands.

use clap::{Args, Subcommand};

use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_database::connection::{DatabasePool, mask_password};
use notehub_database::migration;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            if config.database.provider != "postgres" {
                output::print_warning(&format!(
                    "Store provider '{}' has no migrations",
                    config.database.provider
                ));
                return Ok(());
            }

            output::print_kv("Database", &mask_password(&config.database.url));
            let db = DatabasePool::connect(&config.database).await?;
            let result = migration::run_migrations(&db).await;
            db.close().await;
            result?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
