//! Read access to user accounts.

use std::sync::Arc;

use notehub_core::error::AppError;
use notehub_database::store::UserStore;
use notehub_entity::user::User;

use crate::context::RequestContext;

/// Looks up user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// The account behind the current session.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Session user no longer exists"))
    }

    /// Every account, oldest first.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }
}
