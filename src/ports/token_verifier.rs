//! Token verification port.
//!
//! Verifies a bearer credential issued by the identity provider and returns
//! the claims the service relies on. It does not look up local users; the
//! identity resolver does that on top of this port.
//!
//! # Security Requirements
//!
//! All implementations MUST validate:
//! - **Signature** against the provider's published keys
//! - **Issuer (iss)** and **Audience (aud)**
//! - **Expiry (exp)**

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, VerifiedToken};

/// Verifies identity-provider tokens.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` when keys cannot be fetched
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a raw token (without the "Bearer " prefix).
    async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError>;
}
