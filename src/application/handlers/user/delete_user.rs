//! DeleteUserHandler - Admin command to remove a user record.

use std::sync::Arc;

use crate::domain::foundation::{
    require_role, AuthenticatedUser, DomainError, ErrorCode, Role, UserId,
};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
}

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Deletes the user row only. Memberships, registrations and payments
    /// keyed by the email are left in place.
    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), DomainError> {
        require_role(&cmd.actor, &[Role::Admin])?;

        if cmd.actor.id == cmd.user_id {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Cannot delete your own account",
            ));
        }

        if !self.users.delete(&cmd.user_id).await? {
            return Err(DomainError::not_found("User"));
        }

        tracing::info!(user_id = %cmd.user_id, deleted_by = %cmd.actor.email, "User deleted");
        Ok(())
    }
}
