//! # notehub-database
//!
//! Store traits for the `users`, `folders` and `files` collections, with a
//! PostgreSQL implementation and an in-memory one. [`Stores`] selects the
//! backend from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::Stores;
pub use store::{FileStore, FolderStore, UserStore};
