//! DeleteEventHandler - Command handler for cancelling an event outright.

use std::sync::Arc;

use crate::domain::foundation::{require_role, AuthenticatedUser, DomainError, EventId, Role};
use crate::ports::{ClubRepository, EventRepository};

use super::ownership::require_club_owner;

#[derive(Debug, Clone)]
pub struct DeleteEventCommand {
    pub user: AuthenticatedUser,
    pub event_id: EventId,
}

pub struct DeleteEventHandler {
    clubs: Arc<dyn ClubRepository>,
    events: Arc<dyn EventRepository>,
}

impl DeleteEventHandler {
    pub fn new(clubs: Arc<dyn ClubRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { clubs, events }
    }

    /// Deletes the event together with its registrations.
    pub async fn handle(&self, cmd: DeleteEventCommand) -> Result<(), DomainError> {
        require_role(&cmd.user, &[Role::ClubManager])?;

        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event"))?;

        require_club_owner(
            self.clubs.as_ref(),
            &event.club_id,
            &cmd.user,
            "You can only delete events for your own clubs",
        )
        .await?;

        if !self.events.delete(&event.id).await? {
            return Err(DomainError::not_found("Event"));
        }

        tracing::info!(event_id = %event.id, "Event deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        manager, member, other_manager, seed_club, seed_event, store,
    };
    use crate::domain::club::ClubStatus;
    use crate::domain::event::EventRegistration;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn delete_removes_event_and_registrations() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, None).await;
        let attendee = member("a@example.com");
        store
            .register(&EventRegistration::new(event.id, club.id, &attendee.email, None))
            .await
            .unwrap();

        let handler = DeleteEventHandler::new(store.clone(), store.clone());
        handler
            .handle(DeleteEventCommand {
                user: manager(),
                event_id: event.id,
            })
            .await
            .unwrap();

        assert!(EventRepository::find_by_id(store.as_ref(), &event.id)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_registration(&event.id, &attendee.email)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn non_owner_cannot_delete() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, None).await;
        let handler = DeleteEventHandler::new(store.clone(), store.clone());

        let err = handler
            .handle(DeleteEventCommand {
                user: other_manager(),
                event_id: event.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message(), "You can only delete events for your own clubs");
        assert!(EventRepository::find_by_id(store.as_ref(), &event.id)
            .await
            .unwrap()
            .is_some());
    }
}
