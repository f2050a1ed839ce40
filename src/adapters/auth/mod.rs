//! Authentication adapters.
//!
//! Implementations of the `TokenVerifier` port:
//!
//! - `jwks` - Production verifier for JWTs signed with published JWKS keys
//! - `mock` - Test implementation that doesn't require external services

mod jwks;
mod mock;

pub use jwks::{JwksConfig, JwksTokenVerifier};
pub use mock::MockTokenVerifier;
