//! Club domain module.
//!
//! Clubs are created by managers, approved by admins, and joined by members.
//!
//! # Module Structure
//!
//! - `aggregate` - Club entity and its create/update inputs
//! - `category` - Closed set of club categories
//! - `status` - Approval workflow
//! - `query` - Listing criteria and the summary projection

mod aggregate;
mod category;
mod query;
mod status;

pub use aggregate::{Club, ClubUpdate, NewClub};
pub use category::ClubCategory;
pub use query::{ClubQuery, ClubSortField, ClubSummary};
pub use status::ClubStatus;

/// Number of clubs on the featured shelf.
pub const FEATURED_LIMIT: usize = 6;
