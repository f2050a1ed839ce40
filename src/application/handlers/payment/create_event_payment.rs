//! CreateEventPaymentHandler - Starts a payment for an event's fee.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, EventId};
use crate::domain::payment::Payment;
use crate::ports::{
    ClubRepository, CreateIntentRequest, EventRepository, PaymentProvider, PaymentRepository,
};

use super::PaymentIntentCreated;

#[derive(Debug, Clone)]
pub struct CreateEventPaymentCommand {
    pub user: AuthenticatedUser,
    pub event_id: EventId,
}

pub struct CreateEventPaymentHandler {
    clubs: Arc<dyn ClubRepository>,
    events: Arc<dyn EventRepository>,
    payments: Arc<dyn PaymentRepository>,
    provider: Arc<dyn PaymentProvider>,
    currency: String,
}

impl CreateEventPaymentHandler {
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        events: Arc<dyn EventRepository>,
        payments: Arc<dyn PaymentRepository>,
        provider: Arc<dyn PaymentProvider>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            clubs,
            events,
            payments,
            provider,
            currency: currency.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateEventPaymentCommand,
    ) -> Result<PaymentIntentCreated, DomainError> {
        let not_found =
            || DomainError::new(ErrorCode::NotFound, "Event not found or club not approved");

        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(not_found)?;
        let club_approved = self
            .clubs
            .find_by_id(&event.club_id)
            .await?
            .map(|club| club.is_approved())
            .unwrap_or(false);
        if !club_approved {
            return Err(not_found());
        }

        if !event.requires_payment() {
            return Err(DomainError::new(ErrorCode::ValidationFailed, "This event is free"));
        }

        let request = CreateIntentRequest::new(event.event_fee.cents(), self.currency.clone())
            .with_metadata("type", "event")
            .with_metadata("eventId", event.id.to_string())
            .with_metadata("clubId", event.club_id.to_string())
            .with_metadata("userEmail", cmd.user.email.clone());

        let intent = self.provider.create_payment_intent(request).await.map_err(|e| {
            tracing::error!(event_id = %event.id, error = %e, "Event payment intent failed");
            DomainError::from(e)
        })?;

        let payment = Payment::for_event(
            cmd.user.email.clone(),
            event.club_id,
            event.id,
            event.event_fee,
            &intent.id,
        );
        let created = PaymentIntentCreated::new(intent, payment.id)?;
        self.payments.create(&payment).await?;

        tracing::info!(
            payment_id = %payment.id,
            event_id = %event.id,
            amount_cents = event.event_fee.cents(),
            "Event payment created"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        member, provider, seed_club, seed_event, store,
    };
    use crate::domain::club::ClubStatus;
    use crate::domain::foundation::Money;
    use crate::domain::payment::PaymentType;

    #[tokio::test]
    async fn paid_event_creates_intent_with_event_metadata() {
        let store = store();
        let provider = provider();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let mut event = seed_event(&store, &club, 5, None).await;
        event.is_paid = true;
        event.event_fee = Money::from_cents(999).unwrap();
        EventRepository::update(store.as_ref(), &event).await.unwrap();

        let handler = CreateEventPaymentHandler::new(
            store.clone(),
            store.clone(),
            store.clone(),
            provider.clone(),
            "usd",
        );
        handler
            .handle(CreateEventPaymentCommand {
                user: member("a@example.com"),
                event_id: event.id,
            })
            .await
            .unwrap();

        let request = &provider.created_requests()[0];
        assert_eq!(request.amount_cents, 999);
        assert_eq!(request.metadata.get("eventId"), Some(&event.id.to_string()));
        assert_eq!(request.metadata.get("type").map(String::as_str), Some("event"));

        let payments = store.list_for_user("a@example.com").await.unwrap();
        assert_eq!(payments[0].payment.payment_type, PaymentType::Event);
        assert_eq!(payments[0].payment.event_id, Some(event.id));
        assert_eq!(payments[0].event_title.as_deref(), Some(event.title.as_str()));
    }

    #[tokio::test]
    async fn free_event_is_rejected() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let event = seed_event(&store, &club, 5, None).await;
        let handler =
            CreateEventPaymentHandler::new(store.clone(), store.clone(), store, provider(), "usd");

        let err = handler
            .handle(CreateEventPaymentCommand {
                user: member("a@example.com"),
                event_id: event.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "This event is free");
    }

    #[tokio::test]
    async fn event_of_pending_club_is_not_found() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Pending).await;
        let event = seed_event(&store, &club, 5, None).await;
        let handler =
            CreateEventPaymentHandler::new(store.clone(), store.clone(), store, provider(), "usd");

        let err = handler
            .handle(CreateEventPaymentCommand {
                user: member("a@example.com"),
                event_id: event.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message(), "Event not found or club not approved");
    }
}
