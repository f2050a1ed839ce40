//! Event repository port.
//!
//! Besides plain CRUD this port owns the two operations whose consistency
//! cannot be left to the application: registering (capacity plus uniqueness
//! plus attendee recount) and unregistering (delete plus recount). Each runs
//! as one atomic unit in the implementation.

use async_trait::async_trait;

use crate::domain::event::{Event, EventQuery, EventRegistration, EventWithClub};
use crate::domain::foundation::{DomainError, EventId, Page, Timestamp};

/// Persistence for events and their registrations.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<(), DomainError>;

    /// Persist editable fields. `current_attendees` is never written here.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the event no longer exists
    async fn update(&self, event: &Event) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// The event together with its hosting club.
    async fn find_with_club(&self, id: &EventId) -> Result<Option<EventWithClub>, DomainError>;

    /// Events of approved clubs matching `query`.
    async fn list_public(&self, query: &EventQuery) -> Result<Page<EventWithClub>, DomainError>;

    /// Events of approved clubs dated at or after `now`, soonest first.
    async fn list_upcoming(
        &self,
        now: Timestamp,
        limit: usize,
    ) -> Result<Vec<EventWithClub>, DomainError>;

    /// Events of every club managed by `email`, latest date first.
    async fn list_by_manager(&self, email: &str) -> Result<Vec<EventWithClub>, DomainError>;

    /// Delete the event and all of its registrations. Returns false if the
    /// event did not exist.
    async fn delete(&self, id: &EventId) -> Result<bool, DomainError>;

    /// Atomically admit a registration.
    ///
    /// Under a lock on the event: counts `registered` rows, rejects with
    /// `CapacityReached` when the event has a limit and is full, rejects with
    /// `Conflict` when the user already has a row for this event, inserts,
    /// recounts and stores `current_attendees`. Returns the new count.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the event no longer exists
    /// - `CapacityReached` if the event is full
    /// - `Conflict` on a duplicate (event, email) pair
    async fn register(&self, registration: &EventRegistration) -> Result<u32, DomainError>;

    /// Atomically delete the user's registration and recount.
    ///
    /// Returns the new attendee count, or `None` when the user had no
    /// registration for the event.
    async fn unregister(&self, event_id: &EventId, email: &str)
        -> Result<Option<u32>, DomainError>;

    /// The user's registration for the event, in any status.
    async fn find_registration(
        &self,
        event_id: &EventId,
        email: &str,
    ) -> Result<Option<EventRegistration>, DomainError>;

    /// Number of `registered` rows for the event.
    async fn count_registered(&self, event_id: &EventId) -> Result<u32, DomainError>;
}
