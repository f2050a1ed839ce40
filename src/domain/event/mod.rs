//! Event domain module.
//!
//! Events belong to a club, may charge a fee and may cap attendance.
//! Registrations are unique per (event, user email) and are deleted when the
//! event is deleted.

mod aggregate;
mod query;
mod registration;

pub use aggregate::{Event, EventUpdate, NewEvent};
pub use query::{EventQuery, EventSortField, EventWithClub};
pub use registration::{EventRegistration, RegistrationStatus};

/// Number of events on the upcoming shelf.
pub const UPCOMING_LIMIT: usize = 6;
