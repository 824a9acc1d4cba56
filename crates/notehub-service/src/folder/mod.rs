//! Folder management: listing, creation, rename and one-level delete.

pub mod placement;
pub mod service;

pub use service::{CreateFolderRequest, FolderService};
