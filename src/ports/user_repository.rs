//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::User;

/// Persistence for registered users.
///
/// Implementations must enforce uniqueness of `email` and `external_uid`,
/// reporting a violation as `Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email or external uid is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Lookup by identity-provider subject.
    async fn find_by_external_uid(&self, uid: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// All users, newest first.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Change a user's role, returning the updated user or `None` if absent.
    async fn update_role(&self, id: &UserId, role: Role) -> Result<Option<User>, DomainError>;

    /// Delete a user. Returns false if no such user existed.
    async fn delete(&self, id: &UserId) -> Result<bool, DomainError>;
}
