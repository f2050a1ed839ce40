//! ChangeUserRoleHandler - Admin command to change another user's role.

use std::sync::Arc;

use crate::domain::foundation::{
    require_role, AuthenticatedUser, DomainError, ErrorCode, Role, UserId,
};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct ChangeUserRoleCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,

    /// Raw role name as sent by the client.
    pub role: String,
}

pub struct ChangeUserRoleHandler {
    users: Arc<dyn UserRepository>,
}

impl ChangeUserRoleHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: ChangeUserRoleCommand) -> Result<User, DomainError> {
        require_role(&cmd.actor, &[Role::Admin])?;

        let role: Role = cmd
            .role
            .parse()
            .map_err(|_| DomainError::new(ErrorCode::ValidationFailed, "Invalid role"))?;

        if cmd.actor.id == cmd.user_id {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Cannot change your own role",
            ));
        }

        let user = self
            .users
            .update_role(&cmd.user_id, role)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        tracing::info!(
            user_id = %user.id,
            role = %role.as_str(),
            changed_by = %cmd.actor.email,
            "User role changed"
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{admin, seed_user, store};

    #[tokio::test]
    async fn admin_promotes_member() {
        let store = store();
        let target = seed_user(&store, "m@example.com", "uid-m", Role::Member).await;
        let handler = ChangeUserRoleHandler::new(store);

        let user = handler
            .handle(ChangeUserRoleCommand {
                actor: admin(),
                user_id: target.id,
                role: "clubManager".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.role, Role::ClubManager);
    }

    #[tokio::test]
    async fn unknown_role_is_invalid() {
        let handler = ChangeUserRoleHandler::new(store());
        let err = handler
            .handle(ChangeUserRoleCommand {
                actor: admin(),
                user_id: UserId::new(),
                role: "superuser".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Invalid role");
    }

    #[tokio::test]
    async fn admin_cannot_change_own_role() {
        let actor = admin();
        let handler = ChangeUserRoleHandler::new(store());
        let err = handler
            .handle(ChangeUserRoleCommand {
                user_id: actor.id,
                actor,
                role: "member".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message(), "Cannot change your own role");
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let handler = ChangeUserRoleHandler::new(store());
        let err = handler
            .handle(ChangeUserRoleCommand {
                actor: admin(),
                user_id: UserId::new(),
                role: "member".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message(), "User not found");
    }
}
