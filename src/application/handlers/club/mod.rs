//! Club handlers.
//!
//! ## Commands
//! - Creating a club (manager)
//! - Updating an owned club (manager)
//! - Approving or rejecting a club (admin)
//!
//! ## Queries
//! - Public listing, featured shelf, detail
//! - Manager's own clubs, admin listing

mod create_club;
mod queries;
mod set_club_status;
mod update_club;

pub use create_club::{CreateClubCommand, CreateClubHandler};
pub use queries::ClubQueryHandler;
pub use set_club_status::{SetClubStatusCommand, SetClubStatusHandler};
pub use update_club::{UpdateClubCommand, UpdateClubHandler};
