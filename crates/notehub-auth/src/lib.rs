//! # notehub-auth
//!
//! Authentication primitives for NoteHub.
//!
//! ## Modules
//!
//! - `jwt`: signed session tokens and short-lived OAuth `state` tokens
//! - `password`: Argon2id password hashing and the length policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, SessionToken};
pub use password::{PasswordHasher, PasswordValidator};
