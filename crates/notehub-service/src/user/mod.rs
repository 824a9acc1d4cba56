//! User accounts and sign-in.

pub mod identity;
pub mod service;

pub use identity::{
    AuthorizeRedirect, IdentityService, LoginRequest, RegisterRequest, SessionGrant,
};
pub use service::UserService;
