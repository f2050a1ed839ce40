//! Identity resolver - the production `SessionValidator`.
//!
//! Verifies the bearer token with the identity provider, then finds the
//! local user by provider uid, falling back to the token's email claim.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError};
use crate::domain::user::User;
use crate::ports::{SessionValidator, TokenVerifier, UserRepository};

pub struct IdentityResolver {
    verifier: Arc<dyn TokenVerifier>,
    users: Arc<dyn UserRepository>,
}

impl IdentityResolver {
    pub fn new(verifier: Arc<dyn TokenVerifier>, users: Arc<dyn UserRepository>) -> Self {
        Self { verifier, users }
    }

    async fn lookup(&self, subject: &str, email: Option<&str>) -> Result<Option<User>, DomainError> {
        if let Some(user) = self.users.find_by_external_uid(subject).await? {
            return Ok(Some(user));
        }
        match email {
            Some(email) => self.users.find_by_email(email).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SessionValidator for IdentityResolver {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let verified = self.verifier.verify(token).await?;

        let user = self
            .lookup(&verified.subject, verified.email.as_deref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "User lookup failed during authentication");
                AuthError::service_unavailable("user store unavailable")
            })?;

        match user {
            Some(user) => Ok(user.to_authenticated()),
            None => {
                tracing::debug!(subject = %verified.subject, "No local user for verified token");
                Err(AuthError::UserNotFound)
            }
        }
    }
}
