//! Read-side user handlers.

use std::sync::Arc;

use crate::domain::foundation::{require_role, AuthenticatedUser, DomainError, Role};
use crate::domain::user::User;
use crate::ports::UserRepository;

pub struct UserQueryHandler {
    users: Arc<dyn UserRepository>,
}

impl UserQueryHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// The stored record of the caller.
    pub async fn current(&self, user: &AuthenticatedUser) -> Result<User, DomainError> {
        self.users
            .find_by_id(&user.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Every user, newest first. Admin only.
    pub async fn list_all(&self, user: &AuthenticatedUser) -> Result<Vec<User>, DomainError> {
        require_role(user, &[Role::Admin])?;
        self.users.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{admin, member, seed_user, store};
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn current_returns_the_stored_user() {
        let store = store();
        let stored = seed_user(&store, "m@example.com", "uid-m", Role::Member).await;
        let handler = UserQueryHandler::new(store);

        let user = handler.current(&stored.to_authenticated()).await.unwrap();
        assert_eq!(user, stored);
    }

    #[tokio::test]
    async fn list_all_is_admin_only() {
        let store = store();
        seed_user(&store, "m@example.com", "uid-m", Role::Member).await;
        let handler = UserQueryHandler::new(store);

        assert_eq!(handler.list_all(&admin()).await.unwrap().len(), 1);
        let err = handler.list_all(&member("m@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
