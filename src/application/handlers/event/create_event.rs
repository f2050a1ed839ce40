//! CreateEventHandler - Command handler for scheduling an event.

use std::sync::Arc;

use crate::domain::event::{Event, NewEvent};
use crate::domain::foundation::{require_role, AuthenticatedUser, DomainError, Role};
use crate::ports::{ClubRepository, EventRepository};

use super::ownership::require_club_owner;

#[derive(Debug, Clone)]
pub struct CreateEventCommand {
    pub user: AuthenticatedUser,
    pub fields: NewEvent,
}

pub struct CreateEventHandler {
    clubs: Arc<dyn ClubRepository>,
    events: Arc<dyn EventRepository>,
}

impl CreateEventHandler {
    pub fn new(clubs: Arc<dyn ClubRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { clubs, events }
    }

    pub async fn handle(&self, cmd: CreateEventCommand) -> Result<Event, DomainError> {
        require_role(&cmd.user, &[Role::ClubManager])?;
        require_club_owner(
            self.clubs.as_ref(),
            &cmd.fields.club_id,
            &cmd.user,
            "You can only create events for your own clubs",
        )
        .await?;

        let event = Event::create(cmd.fields)?;
        self.events.create(&event).await?;

        tracing::info!(event_id = %event.id, club_id = %event.club_id, "Event created");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        manager, new_event, other_manager, seed_club, store,
    };
    use crate::domain::club::ClubStatus;
    use crate::domain::foundation::{ClubId, ErrorCode, Money};

    #[tokio::test]
    async fn owner_creates_event_with_zero_attendees() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let handler = CreateEventHandler::new(store.clone(), store.clone());

        let mut fields = new_event(&club, 3, Some(10));
        fields.event_fee = Some(Money::from_cents(500).unwrap());

        let event = handler
            .handle(CreateEventCommand {
                user: manager(),
                fields,
            })
            .await
            .unwrap();

        assert_eq!(event.current_attendees, 0);
        assert_eq!(event.event_fee, Money::ZERO, "unpaid events carry no fee");
        assert!(EventRepository::find_by_id(store.as_ref(), &event.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn other_manager_is_forbidden() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let handler = CreateEventHandler::new(store.clone(), store);

        let err = handler
            .handle(CreateEventCommand {
                user: other_manager(),
                fields: new_event(&club, 3, None),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message(), "You can only create events for your own clubs");
    }

    #[tokio::test]
    async fn missing_club_is_forbidden() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let handler = CreateEventHandler::new(store.clone(), store);

        let mut fields = new_event(&club, 3, None);
        fields.club_id = ClubId::new();

        let err = handler
            .handle(CreateEventCommand {
                user: manager(),
                fields,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
