//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, roles, errors and the access-control
//! building blocks shared by every ClubSphere domain module.

mod auth;
mod authorization;
mod errors;
mod ids;
mod money;
mod ownership;
mod pagination;
mod role;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, VerifiedToken};
pub use authorization::require_role;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClubId, EventId, MembershipId, PaymentId, RegistrationId, UserId};
pub use money::Money;
pub use ownership::OwnedByEmail;
pub use pagination::{Page, PageRequest, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use role::Role;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
