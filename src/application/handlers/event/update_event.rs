//! UpdateEventHandler - Command handler for editing an event.

use std::sync::Arc;

use crate::domain::event::{Event, EventUpdate};
use crate::domain::foundation::{require_role, AuthenticatedUser, DomainError, EventId, Role};
use crate::ports::{ClubRepository, EventRepository};

use super::ownership::require_club_owner;

#[derive(Debug, Clone)]
pub struct UpdateEventCommand {
    pub user: AuthenticatedUser,
    pub event_id: EventId,
    pub update: EventUpdate,
}

pub struct UpdateEventHandler {
    clubs: Arc<dyn ClubRepository>,
    events: Arc<dyn EventRepository>,
}

impl UpdateEventHandler {
    pub fn new(clubs: Arc<dyn ClubRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { clubs, events }
    }

    /// Applies a partial update. The attendee count is never written here.
    pub async fn handle(&self, cmd: UpdateEventCommand) -> Result<Event, DomainError> {
        require_role(&cmd.user, &[Role::ClubManager])?;

        let mut event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event"))?;

        require_club_owner(
            self.clubs.as_ref(),
            &event.club_id,
            &cmd.user,
            "You can only update events for your own clubs",
        )
        .await?;

        event.apply_update(cmd.update)?;
        self.events.update(&event).await?;

        tracing::info!(event_id = %event.id, "Event updated");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        manager, other_manager, seed_club, seed_event, store,
    };
    use crate::domain::club::ClubStatus;
    use crate::domain::foundation::{ErrorCode, Money};

    #[tokio::test]
    async fn switching_to_free_forces_zero_fee() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let mut event = seed_event(&store, &club, 5, None).await;
        event.is_paid = true;
        event.event_fee = Money::from_cents(2000).unwrap();
        EventRepository::update(store.as_ref(), &event).await.unwrap();

        let handler = UpdateEventHandler::new(store.clone(), store.clone());
        let updated = handler
            .handle(UpdateEventCommand {
                user: manager(),
                event_id: event.id,
                update: EventUpdate {
                    is_paid: Some(false),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert!(!updated.is_paid);
        assert_eq!(updated.event_fee, Money::ZERO);
    }

    #[tokio::test]
    async fn null_max_attendees_clears_limit() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, Some(10)).await;
        let handler = UpdateEventHandler::new(store.clone(), store.clone());

        let updated = handler
            .handle(UpdateEventCommand {
                user: manager(),
                event_id: event.id,
                update: EventUpdate {
                    max_attendees: Some(None),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.max_attendees, None);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, None).await;
        let handler = UpdateEventHandler::new(store.clone(), store);

        let err = handler
            .handle(UpdateEventCommand {
                user: other_manager(),
                event_id: event.id,
                update: EventUpdate::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message(), "You can only update events for your own clubs");
    }

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let handler = UpdateEventHandler::new(store(), store());
        let err = handler
            .handle(UpdateEventCommand {
                user: manager(),
                event_id: EventId::new(),
                update: EventUpdate::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Event not found");
    }
}
