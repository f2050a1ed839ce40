//! User entity.

use crate::domain::foundation::{AuthenticatedUser, DomainError, Role, Timestamp, UserId};

/// A registered person. Email and external uid are each unique.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,

    /// Subject of the identity provider (Firebase uid).
    pub external_uid: String,

    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: Timestamp,
}

impl User {
    /// Registers a new user with the default `member` role.
    pub fn register(
        name: impl Into<String>,
        email: impl Into<String>,
        photo_url: Option<String>,
        external_uid: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        let external_uid = external_uid.into().trim().to_string();

        if name.is_empty() {
            return Err(DomainError::validation("name", "name is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email", "a valid email is required"));
        }
        if external_uid.is_empty() {
            return Err(DomainError::validation("firebaseUID", "firebaseUID is required"));
        }

        Ok(Self {
            id: UserId::new(),
            external_uid,
            name,
            email,
            photo_url: photo_url.filter(|url| !url.is_empty()),
            role: Role::Member,
            created_at: Timestamp::now(),
        })
    }

    /// Identity attached to requests made by this user.
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.email.clone(), self.name.clone(), self.role)
    }
}
