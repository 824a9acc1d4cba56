//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use notehub_auth::jwt::{JwtDecoder, JwtEncoder};
use notehub_auth::password::{PasswordHasher, PasswordValidator};
use notehub_core::config::AppConfig;
use notehub_core::result::AppResult;
use notehub_database::Stores;
use notehub_github::{GitHubClient, OAuthClient};
use notehub_service::{
    FileService, FolderService, IdentityService, RepositoryService, SyncService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the process started serving
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Document store handles
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token verification
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and sign-in
    pub identity_service: Arc<IdentityService>,
    /// Profile lookups
    pub user_service: Arc<UserService>,
    /// Folder hierarchy
    pub folder_service: Arc<FolderService>,
    /// Note files
    pub file_service: Arc<FileService>,
    /// GitHub repository listing and creation
    pub repository_service: Arc<RepositoryService>,
    /// Push of the file set to GitHub
    pub sync_service: Arc<SyncService>,
}

impl AppState {
    /// Wires every service over the given stores.
    pub fn new(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let github = Arc::new(GitHubClient::new(&config.github)?);
        let oauth = Arc::new(OAuthClient::new(&config.github)?);

        let identity_service = Arc::new(IdentityService::new(
            Arc::clone(&stores.users),
            password_hasher,
            password_validator,
            jwt_encoder,
            Arc::clone(&jwt_decoder),
            oauth,
            Arc::clone(&github),
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&stores.users)));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.files),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&stores.files),
            Arc::clone(&stores.folders),
        ));
        let repository_service = Arc::new(RepositoryService::new(
            Arc::clone(&github),
            config.github.default_repository_description.clone(),
        ));
        let sync_service = Arc::new(SyncService::new(
            Arc::clone(&stores.files),
            github,
            config.github.commit_message_prefix.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            stores,
            jwt_decoder,
            identity_service,
            user_service,
            folder_service,
            file_service,
            repository_service,
            sync_service,
        })
    }
}
