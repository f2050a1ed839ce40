//! ConfirmPaymentHandler - Pulls an intent's outcome from the processor.
//!
//! Confirmation is idempotent: a payment that already succeeded is reported
//! as confirmed again without another write. Nothing here creates the
//! membership or registration the payment was for; the client follows up
//! with the join or register call carrying the payment id.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::{IntentStatus, PaymentProvider, PaymentRepository};

#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub user: AuthenticatedUser,
    pub payment_intent_id: String,
}

pub struct ConfirmPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    provider: Arc<dyn PaymentProvider>,
}

impl ConfirmPaymentHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, provider: Arc<dyn PaymentProvider>) -> Self {
        Self { payments, provider }
    }

    pub async fn handle(&self, cmd: ConfirmPaymentCommand) -> Result<Payment, DomainError> {
        let mut payment = self
            .payments
            .find_by_intent_id(&cmd.payment_intent_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment"))?;

        if !payment.is_owned_by_email(&cmd.user.email) {
            return Err(DomainError::forbidden("Access denied"));
        }

        let intent = self
            .provider
            .retrieve_payment_intent(&cmd.payment_intent_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    intent_id = %cmd.payment_intent_id,
                    error = %e,
                    "Failed to retrieve payment intent"
                );
                DomainError::from(e)
            })?;

        match intent.status {
            IntentStatus::Succeeded => {
                if payment.transition(PaymentStatus::Succeeded)? {
                    self.payments.update(&payment).await?;
                    tracing::info!(payment_id = %payment.id, "Payment confirmed");
                }
                Ok(payment)
            }
            IntentStatus::Canceled => {
                if payment.transition(PaymentStatus::Cancelled)? {
                    self.payments.update(&payment).await?;
                }
                Err(DomainError::invalid_state("Payment was cancelled"))
            }
            status => {
                tracing::debug!(payment_id = %payment.id, ?status, "Payment not yet successful");
                Err(DomainError::invalid_state("Payment not successful"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{member, provider, store};
    use crate::domain::foundation::{ClubId, ErrorCode, Money};

    async fn pending_payment(
        store: &crate::adapters::memory::InMemoryStore,
        email: &str,
        intent: &str,
    ) -> Payment {
        let payment =
            Payment::for_membership(email, ClubId::new(), Money::from_cents(1500).unwrap(), intent);
        store.create(&payment).await.unwrap();
        payment
    }

    fn confirm(email: &str, intent: &str) -> ConfirmPaymentCommand {
        ConfirmPaymentCommand {
            user: member(email),
            payment_intent_id: intent.to_string(),
        }
    }

    #[tokio::test]
    async fn succeeded_intent_marks_payment_succeeded_once() {
        let store = store();
        let provider = provider();
        pending_payment(&store, "a@example.com", "pi_1").await;
        provider.set_intent_status("pi_1", IntentStatus::Succeeded);
        let handler = ConfirmPaymentHandler::new(store.clone(), provider.clone());

        let first = handler.handle(confirm("a@example.com", "pi_1")).await.unwrap();
        let second = handler.handle(confirm("a@example.com", "pi_1")).await.unwrap();

        assert_eq!(first.status, PaymentStatus::Succeeded);
        assert_eq!(second.status, PaymentStatus::Succeeded);
        assert_eq!(second.updated_at, first.updated_at);
        assert_eq!(provider.call_count("retrieve_payment_intent"), 2);
    }

    #[tokio::test]
    async fn processing_intent_leaves_payment_pending() {
        let store = store();
        let provider = provider();
        pending_payment(&store, "a@example.com", "pi_1").await;
        provider.set_intent_status("pi_1", IntentStatus::Processing);
        let handler = ConfirmPaymentHandler::new(store.clone(), provider);

        let err = handler.handle(confirm("a@example.com", "pi_1")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message(), "Payment not successful");
        let stored = store.find_by_intent_id("pi_1").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn canceled_intent_marks_payment_cancelled() {
        let store = store();
        let provider = provider();
        pending_payment(&store, "a@example.com", "pi_1").await;
        provider.set_intent_status("pi_1", IntentStatus::Canceled);
        let handler = ConfirmPaymentHandler::new(store.clone(), provider);

        let err = handler.handle(confirm("a@example.com", "pi_1")).await.unwrap_err();

        assert_eq!(err.message(), "Payment was cancelled");
        let stored = store.find_by_intent_id("pi_1").await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Cancelled);
    }

    #[tokio::test]
    async fn other_users_payment_is_forbidden_without_calling_processor() {
        let store = store();
        let provider = provider();
        pending_payment(&store, "a@example.com", "pi_1").await;
        let handler = ConfirmPaymentHandler::new(store, provider.clone());

        let err = handler.handle(confirm("b@example.com", "pi_1")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(provider.call_count("retrieve_payment_intent"), 0);
    }

    #[tokio::test]
    async fn unknown_intent_is_not_found() {
        let handler = ConfirmPaymentHandler::new(store(), provider());
        let err = handler.handle(confirm("a@example.com", "pi_x")).await.unwrap_err();
        assert_eq!(err.message(), "Payment not found");
    }
}
