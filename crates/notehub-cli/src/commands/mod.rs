//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use notehub_core::config::{AppConfig, LoggingConfig};
use notehub_core::error::AppError;

use crate::output::OutputFormat;

/// NoteHub: personal notes synced to GitHub
#[derive(Debug, Parser)]
#[command(name = "notehub", version, about, long_about = None)]
pub struct Cli {
    /// Explicit configuration file; overrides `--env`
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay loaded on top of `config/default.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the NoteHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;

        match &self.command {
            Commands::Serve(args) => {
                init_logging(&config.logging, &config.logging.level);
                serve::execute(args, config).await
            }
            Commands::Migrate(args) => {
                init_logging(&config.logging, "warn");
                migrate::execute(args, &config).await
            }
            Commands::User(args) => {
                init_logging(&config.logging, "warn");
                user::execute(args, config, self.format).await
            }
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(&self.env),
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over `default_level`.
fn init_logging(config: &LoggingConfig, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if config.format == "json" {
        fmt().json().with_env_filter(filter).with_target(true).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }
}
