//! Membership domain module.
//!
//! A membership is a user's relationship to one club.

mod aggregate;
mod status;

pub use aggregate::{Membership, MembershipWithClub};
pub use status::MembershipStatus;
