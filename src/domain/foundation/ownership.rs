//! Ownership by email snapshot.
//!
//! Clubs record their manager as a plain email string copied from the
//! creator's identity at creation time. Ownership is therefore an exact string
//! comparison against the authenticated caller's email, never against an id
//! supplied by the client. Renaming a user's email breaks the link.

use super::{AuthenticatedUser, DomainError};

/// Trait for resources owned by the user holding a given email.
pub trait OwnedByEmail {
    /// Email of the owning user.
    fn owner_email(&self) -> &str;

    /// Checks if the given user is the owner.
    fn is_owned_by(&self, user: &AuthenticatedUser) -> bool {
        self.owner_email() == user.email
    }

    /// Validates ownership, returning `Forbidden` with `message` otherwise.
    fn check_ownership(&self, user: &AuthenticatedUser, message: &str) -> Result<(), DomainError> {
        if self.is_owned_by(user) {
            Ok(())
        } else {
            tracing::warn!(
                owner = %self.owner_email(),
                requested_by = %user.email,
                "Ownership check failed"
            );
            Err(DomainError::forbidden(message).with_detail("requested_by", user.email.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, Role, UserId};

    struct Owned(String);

    impl OwnedByEmail for Owned {
        fn owner_email(&self) -> &str {
            &self.0
        }
    }

    fn user(email: &str) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), email, "Test", Role::ClubManager)
    }

    #[test]
    fn owner_passes_check() {
        let resource = Owned("owner@example.com".to_string());
        assert!(resource.check_ownership(&user("owner@example.com"), "nope").is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let resource = Owned("owner@example.com".to_string());
        let err = resource
            .check_ownership(&user("other@example.com"), "You can only update your own clubs")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message, "You can only update your own clubs");
    }

    #[test]
    fn comparison_is_exact() {
        let resource = Owned("Owner@Example.com".to_string());
        assert!(!resource.is_owned_by(&user("owner@example.com")));
    }
}
