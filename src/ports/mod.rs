//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity
//!
//! - `TokenVerifier` - Verifies identity-provider tokens
//! - `SessionValidator` - Resolves a token to a local user
//!
//! ## Persistence
//!
//! - `UserRepository`, `ClubRepository`, `EventRepository`,
//!   `MembershipRepository`, `PaymentRepository`
//!
//! ## Payments
//!
//! - `PaymentProvider` - Creates and reads payment intents

mod club_repository;
mod event_repository;
mod membership_repository;
mod payment_provider;
mod payment_repository;
mod session_validator;
mod token_verifier;
mod user_repository;

pub use club_repository::ClubRepository;
pub use event_repository::EventRepository;
pub use membership_repository::MembershipRepository;
pub use payment_provider::{
    CreateIntentRequest, IntentStatus, PaymentError, PaymentErrorCode, PaymentIntent,
    PaymentProvider,
};
pub use payment_repository::PaymentRepository;
pub use session_validator::SessionValidator;
pub use token_verifier::TokenVerifier;
pub use user_repository::UserRepository;
