//! Membership handlers.
//!
//! ## Commands
//! - Joining an approved club, with payment gating for paid clubs
//!
//! ## Queries
//! - Caller's memberships, a club's members (manager or admin)

mod join_club;
mod queries;

pub use join_club::{JoinClubCommand, JoinClubHandler};
pub use queries::MembershipQueryHandler;
