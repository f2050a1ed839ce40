//! Session validation port.
//!
//! Turns a bearer token into the local user making the request. HTTP
//! middleware depends on this port only; the production implementation is
//! the identity resolver, which combines a `TokenVerifier` with the user
//! repository.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Resolves access tokens to authenticated users.
///
/// # Contract
///
/// - `AuthError::InvalidToken` / `TokenExpired` when the token fails
///   verification
/// - `AuthError::UserNotFound` when the token is valid but no local user
///   matches it
/// - `AuthError::ServiceUnavailable` for transient failures
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token and return the user it belongs to.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
