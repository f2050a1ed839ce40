//! Read-side event handlers.

use std::sync::Arc;

use crate::domain::event::{EventQuery, EventRegistration, EventWithClub, UPCOMING_LIMIT};
use crate::domain::foundation::{
    require_role, AuthenticatedUser, DomainError, EventId, Page, Role, Timestamp,
};
use crate::ports::EventRepository;

pub struct EventQueryHandler {
    events: Arc<dyn EventRepository>,
}

impl EventQueryHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Public listing of events hosted by approved clubs.
    pub async fn list_public(&self, query: &EventQuery) -> Result<Page<EventWithClub>, DomainError> {
        self.events.list_public(query).await
    }

    pub async fn upcoming(&self) -> Result<Vec<EventWithClub>, DomainError> {
        self.events
            .list_upcoming(Timestamp::now(), UPCOMING_LIMIT)
            .await
    }

    pub async fn get(&self, id: &EventId) -> Result<EventWithClub, DomainError> {
        self.events
            .find_with_club(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event"))
    }

    /// Events across every club the caller manages.
    pub async fn managed_by(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<EventWithClub>, DomainError> {
        require_role(user, &[Role::ClubManager])?;
        self.events.list_by_manager(&user.email).await
    }

    /// The caller's live registration for the event, if any.
    pub async fn registration_status(
        &self,
        user: &AuthenticatedUser,
        event_id: &EventId,
    ) -> Result<Option<EventRegistration>, DomainError> {
        let registration = self.events.find_registration(event_id, &user.email).await?;
        Ok(registration.filter(EventRegistration::is_active))
    }
}
