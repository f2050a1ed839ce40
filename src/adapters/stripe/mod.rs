//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port with Stripe PaymentIntents, plus a
//! mock for tests and local development.
//!
//! # Security
//!
//! The secret key is handled via `secrecy::SecretString`.
//!
//! # Configuration
//!
//! - `CLUB_SPHERE__PAYMENT__STRIPE_API_KEY`: Stripe secret API key

mod mock_payment_provider;
mod stripe_adapter;

pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
