//! GitHub-backed operations: repository management and the file sync.

pub mod repository;
pub mod sync;

pub use repository::{CreateRepositoryRequest, RepositoryService, RepositorySummary};
pub use sync::{SyncOutcome, SyncService};
