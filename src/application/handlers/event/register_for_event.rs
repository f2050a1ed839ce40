//! RegisterForEventHandler - Command handler for a member taking a seat.
//!
//! The capacity and duplicate checks here give the caller a precise error in
//! the common case. The repository repeats both inside one atomic unit, so
//! two concurrent requests can never both pass.

use std::sync::Arc;

use crate::domain::event::EventRegistration;
use crate::domain::foundation::{
    require_role, AuthenticatedUser, DomainError, ErrorCode, EventId, Role, Timestamp,
};
use crate::ports::EventRepository;

#[derive(Debug, Clone)]
pub struct RegisterForEventCommand {
    pub user: AuthenticatedUser,
    pub event_id: EventId,

    /// Client-supplied payment reference, stored unverified.
    pub payment_id: Option<String>,
}

pub struct RegisterForEventHandler {
    events: Arc<dyn EventRepository>,
}

impl RegisterForEventHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// # Errors
    ///
    /// - `NotFound` if the event does not exist
    /// - `InvalidState` if the event date has passed
    /// - `CapacityReached` if the event is full
    /// - `Conflict` if the caller is already registered
    pub async fn handle(&self, cmd: RegisterForEventCommand) -> Result<EventRegistration, DomainError> {
        require_role(&cmd.user, &[Role::Member])?;

        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event"))?;

        if event.has_started(Timestamp::now()) {
            return Err(DomainError::invalid_state("Cannot register for past events"));
        }

        if event.max_attendees.is_some() {
            let registered = self.events.count_registered(&event.id).await?;
            if event.is_full(registered) {
                return Err(DomainError::capacity("Event is full"));
            }
        }

        if self
            .events
            .find_registration(&event.id, &cmd.user.email)
            .await?
            .is_some()
        {
            return Err(already_registered());
        }

        let payment_id = cmd.payment_id.filter(|id| !id.trim().is_empty());
        let registration =
            EventRegistration::new(event.id, event.club_id, cmd.user.email.clone(), payment_id);

        let attendees = self
            .events
            .register(&registration)
            .await
            .map_err(|e| match e.code {
                ErrorCode::Conflict => already_registered(),
                _ => e,
            })?;

        tracing::info!(
            event_id = %event.id,
            user = %cmd.user.email,
            attendees,
            "Registered for event"
        );
        Ok(registration)
    }
}

fn already_registered() -> DomainError {
    DomainError::conflict("You are already registered for this event")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        manager, member, seed_club, seed_event, store,
    };
    use crate::domain::club::ClubStatus;

    fn command(event_id: EventId, email: &str) -> RegisterForEventCommand {
        RegisterForEventCommand {
            user: member(email),
            event_id,
            payment_id: None,
        }
    }

    #[tokio::test]
    async fn member_registers_and_attendees_are_counted() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, Some(10)).await;
        let handler = RegisterForEventHandler::new(store.clone());

        let registration = handler
            .handle(RegisterForEventCommand {
                payment_id: Some("pay_1".to_string()),
                ..command(event.id, "a@example.com")
            })
            .await
            .unwrap();

        assert!(registration.is_active());
        assert_eq!(registration.payment_id.as_deref(), Some("pay_1"));
        let stored = store.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.current_attendees, 1);
    }

    #[tokio::test]
    async fn past_event_is_invalid_state() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, -1, None).await;
        let handler = RegisterForEventHandler::new(store);

        let err = handler
            .handle(command(event.id, "a@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message(), "Cannot register for past events");
    }

    #[tokio::test]
    async fn three_members_two_seats() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, Some(2)).await;
        let handler = RegisterForEventHandler::new(store.clone());

        handler.handle(command(event.id, "a@example.com")).await.unwrap();
        handler.handle(command(event.id, "b@example.com")).await.unwrap();
        let err = handler
            .handle(command(event.id, "c@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CapacityReached);
        assert_eq!(err.message(), "Event is full");
        let stored = store.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.current_attendees, 2);
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, None).await;
        let handler = RegisterForEventHandler::new(store);

        handler.handle(command(event.id, "a@example.com")).await.unwrap();
        let err = handler
            .handle(command(event.id, "a@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message(), "You are already registered for this event");
    }

    #[tokio::test]
    async fn concurrent_duplicates_yield_one_success() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, None).await;
        let first = RegisterForEventHandler::new(store.clone());
        let second = RegisterForEventHandler::new(store.clone());

        let (a, b) = tokio::join!(
            first.handle(command(event.id, "a@example.com")),
            second.handle(command(event.id, "a@example.com")),
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let stored = store.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.current_attendees, 1);
    }

    #[tokio::test]
    async fn capacity_admits_exactly_n_under_concurrency() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, Some(3)).await;

        let mut tasks = Vec::new();
        for i in 0..8 {
            let handler = RegisterForEventHandler::new(store.clone());
            let event_id = event.id;
            tasks.push(tokio::spawn(async move {
                handler
                    .handle(command(event_id, &format!("m{}@example.com", i)))
                    .await
            }));
        }

        let mut admitted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 3);
        let stored = store.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.current_attendees, 3);
        assert_eq!(store.count_registered(&event.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn managers_cannot_register() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, None).await;
        let handler = RegisterForEventHandler::new(store);

        let err = handler
            .handle(RegisterForEventCommand {
                user: manager(),
                event_id: event.id,
                payment_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
