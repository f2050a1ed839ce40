//! Mock token verifier for testing.
//!
//! Lets tests and local development authenticate without a real identity
//! provider.
//!
//! # Example
//!
//! ```ignore
//! let verifier = MockTokenVerifier::new()
//!     .with_token("member-token", "uid-member", "member@example.com");
//!
//! let token = verifier.verify("member-token").await?;
//! assert_eq!(token.subject, "uid-member");
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, VerifiedToken};
use crate::ports::TokenVerifier;

/// Mock token verifier.
///
/// Stores a map of tokens to verified claims. Tokens not in the map return
/// `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockTokenVerifier {
    tokens: RwLock<HashMap<String, VerifiedToken>>,

    /// Optional error to return for all verifications.
    force_error: RwLock<Option<AuthError>>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token for the given subject and email.
    pub fn with_token(
        self,
        token: impl Into<String>,
        subject: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.add_token(token, subject, email);
        self
    }

    /// Forces all verifications to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(
        &self,
        token: impl Into<String>,
        subject: impl Into<String>,
        email: impl Into<String>,
    ) {
        let verified = VerifiedToken {
            subject: subject.into(),
            email: Some(email.into()),
        };
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), verified);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
