//! Start the NoteHub server.

use clap::Args;

use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_database::Stores;
use notehub_database::connection::mask_password;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    /// Skip applying migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.provider = "memory".to_string();
    }
    if args.no_migrate {
        config.database.run_migrations = false;
    }

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        provider = %config.database.provider,
        database = %mask_password(&config.database.url),
        "Starting NoteHub server"
    );

    let stores = Stores::connect(&config.database).await?;
    notehub_api::run_server(config, stores).await
}
