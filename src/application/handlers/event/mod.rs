//! Event handlers.
//!
//! ## Commands
//! - Creating, updating and deleting events of owned clubs (manager)
//! - Registering for and leaving an event (member)
//!
//! ## Queries
//! - Public listing, upcoming shelf, detail
//! - Manager's events, caller's registration status

mod create_event;
mod delete_event;
mod ownership;
mod queries;
mod register_for_event;
mod unregister_from_event;
mod update_event;

pub use create_event::{CreateEventCommand, CreateEventHandler};
pub use delete_event::{DeleteEventCommand, DeleteEventHandler};
pub use queries::EventQueryHandler;
pub use register_for_event::{RegisterForEventCommand, RegisterForEventHandler};
pub use unregister_from_event::{UnregisterFromEventCommand, UnregisterFromEventHandler};
pub use update_event::{UpdateEventCommand, UpdateEventHandler};
