//! Authentication types for the domain layer.
//!
//! These types represent a caller whose bearer token was verified and whose
//! stored user record was found. They have **no provider dependencies**; the
//! `TokenVerifier` port produces `VerifiedToken`, and the identity resolver
//! turns it into an `AuthenticatedUser`.

use super::{Role, UserId};
use thiserror::Error;

/// Claims we rely on from a verified identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    /// Identity-provider subject (e.g. the Firebase uid).
    pub subject: String,

    /// Email claim, if the provider included one.
    pub email: Option<String>,
}

/// Caller identity attached to every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Local user record id.
    pub id: UserId,

    /// Email used for all ownership comparisons.
    pub email: String,

    pub name: String,

    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but no local user record matches it.
    #[error("User not found")]
    UserNotFound,

    /// The identity provider or user store could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}
