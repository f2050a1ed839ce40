//! UnregisterFromEventHandler - Command handler for a member giving up a seat.

use std::sync::Arc;

use crate::domain::foundation::{require_role, AuthenticatedUser, DomainError, EventId, Role};
use crate::ports::EventRepository;

#[derive(Debug, Clone)]
pub struct UnregisterFromEventCommand {
    pub user: AuthenticatedUser,
    pub event_id: EventId,
}

pub struct UnregisterFromEventHandler {
    events: Arc<dyn EventRepository>,
}

impl UnregisterFromEventHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Deletes the caller's registration and recounts attendees.
    pub async fn handle(&self, cmd: UnregisterFromEventCommand) -> Result<(), DomainError> {
        require_role(&cmd.user, &[Role::Member])?;

        let attendees = self
            .events
            .unregister(&cmd.event_id, &cmd.user.email)
            .await?
            .ok_or_else(|| DomainError::not_found("Registration"))?;

        tracing::info!(
            event_id = %cmd.event_id,
            user = %cmd.user.email,
            attendees,
            "Unregistered from event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::event::{RegisterForEventCommand, RegisterForEventHandler};
    use crate::application::handlers::test_support::{member, seed_club, seed_event, store};
    use crate::domain::club::ClubStatus;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn unregister_frees_the_seat() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, Some(1)).await;
        let user = member("a@example.com");

        RegisterForEventHandler::new(store.clone())
            .handle(RegisterForEventCommand {
                user: user.clone(),
                event_id: event.id,
                payment_id: None,
            })
            .await
            .unwrap();

        UnregisterFromEventHandler::new(store.clone())
            .handle(UnregisterFromEventCommand {
                user,
                event_id: event.id,
            })
            .await
            .unwrap();

        let stored = store.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.current_attendees, 0);

        RegisterForEventHandler::new(store.clone())
            .handle(RegisterForEventCommand {
                user: member("b@example.com"),
                event_id: event.id,
                payment_id: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_registration_is_not_found() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, None).await;

        let err = UnregisterFromEventHandler::new(store)
            .handle(UnregisterFromEventCommand {
                user: member("a@example.com"),
                event_id: event.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message(), "Registration not found");
    }
}
