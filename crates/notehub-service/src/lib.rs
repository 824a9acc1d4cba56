//! # notehub-service
//!
//! Business logic for NoteHub. Each service works on behalf of the caller
//! described by a [`RequestContext`] and scopes every store access to that
//! user.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod github;
pub mod user;

pub use context::RequestContext;
pub use file::FileService;
pub use folder::FolderService;
pub use github::{RepositoryService, SyncService};
pub use user::{IdentityService, UserService};
