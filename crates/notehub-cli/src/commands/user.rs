//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notehub_api::AppState;
use notehub_core::config::{AppConfig, DatabaseConfig};
use notehub_core::error::AppError;
use notehub_database::Stores;
use notehub_entity::user::User;
use notehub_service::user::RegisterRequest;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a credentials account
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Display name (defaults to the email)
        #[arg(short, long)]
        name: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List all users
    List,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Display name
    name: String,
    /// GitHub login
    github: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            name: u.name.clone(),
            github: u.github_username.clone().unwrap_or_else(|| "-".to_string()),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// User records only make sense against a store that outlives this process.
fn require_persistent_store(config: &DatabaseConfig) -> Result<(), AppError> {
    if config.provider == "postgres" {
        return Ok(());
    }
    output::print_warning(&format!(
        "Store provider '{}' does not keep users after this command exits",
        config.provider
    ));
    Err(AppError::configuration(
        "User commands require the postgres store provider",
    ))
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    require_persistent_store(&config.database)?;

    let stores = Stores::connect(&config.database).await?;
    let state = AppState::new(config, stores.clone())?;

    let result = match &args.command {
        UserCommand::Create {
            email,
            name,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            state
                .identity_service
                .register(RegisterRequest {
                    email: email.clone(),
                    password,
                    name: name.clone(),
                })
                .await
                .map(|user| {
                    output::print_success(&format!("User '{}' created", user.email));
                    output::print_kv("ID", &user.id.to_string());
                })
        }
        UserCommand::List => state.user_service.list_users().await.map(|users| {
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }),
    };

    stores.close().await;
    result
}
