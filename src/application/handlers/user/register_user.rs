//! RegisterUserHandler - Command handler for first-time sign-up.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// Command to register the caller of the identity provider as a local user.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub external_uid: String,
}

pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Creates a `member` user.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` "User already exists" if the email or uid is taken
    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, DomainError> {
        let user = User::register(cmd.name, cmd.email, cmd.photo_url, cmd.external_uid)?;

        if self.users.find_by_email(&user.email).await?.is_some()
            || self
                .users
                .find_by_external_uid(&user.external_uid)
                .await?
                .is_some()
        {
            return Err(already_exists());
        }

        self.users.create(&user).await.map_err(|e| match e.code {
            ErrorCode::Conflict => already_exists(),
            _ => e,
        })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }
}

fn already_exists() -> DomainError {
    DomainError::new(ErrorCode::ValidationFailed, "User already exists")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::store;
    use crate::domain::foundation::Role;

    fn command(email: &str, uid: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            name: "Nadia".to_string(),
            email: email.to_string(),
            photo_url: Some("https://img.example.com/n.png".to_string()),
            external_uid: uid.to_string(),
        }
    }

    #[tokio::test]
    async fn registers_new_user_as_member() {
        let store = store();
        let handler = RegisterUserHandler::new(store.clone());

        let user = handler.handle(command("n@example.com", "uid-1")).await.unwrap();

        assert_eq!(user.role, Role::Member);
        assert_eq!(
            store.find_by_external_uid("uid-1").await.unwrap().map(|u| u.id),
            Some(user.id)
        );
    }

    #[tokio::test]
    async fn duplicate_email_or_uid_is_rejected() {
        let store = store();
        let handler = RegisterUserHandler::new(store);
        handler.handle(command("n@example.com", "uid-1")).await.unwrap();

        let err = handler
            .handle(command("n@example.com", "uid-2"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message(), "User already exists");

        let err = handler
            .handle(command("other@example.com", "uid-1"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "User already exists");
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let handler = RegisterUserHandler::new(store());
        let err = handler.handle(command("nope", "uid-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
