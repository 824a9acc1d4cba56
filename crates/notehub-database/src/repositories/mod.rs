//! PostgreSQL implementations of the store traits.

pub mod file;
pub mod folder;
pub mod user;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use user::UserRepository;
