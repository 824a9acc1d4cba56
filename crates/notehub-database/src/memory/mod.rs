//! In-process store backed by `DashMap`, used for local runs and tests.

pub mod store;

pub use store::MemoryStore;
