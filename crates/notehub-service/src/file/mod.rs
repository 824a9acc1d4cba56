//! File management and content updates.

pub mod service;

pub use service::{CreateFileRequest, FileService, UpdateFileRequest};
