//! CreateMembershipPaymentHandler - Starts a payment for a club's joining fee.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ClubId, DomainError, ErrorCode};
use crate::domain::payment::Payment;
use crate::ports::{ClubRepository, CreateIntentRequest, PaymentProvider, PaymentRepository};

use super::PaymentIntentCreated;

#[derive(Debug, Clone)]
pub struct CreateMembershipPaymentCommand {
    pub user: AuthenticatedUser,
    pub club_id: ClubId,
}

pub struct CreateMembershipPaymentHandler {
    clubs: Arc<dyn ClubRepository>,
    payments: Arc<dyn PaymentRepository>,
    provider: Arc<dyn PaymentProvider>,
    currency: String,
}

impl CreateMembershipPaymentHandler {
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        payments: Arc<dyn PaymentRepository>,
        provider: Arc<dyn PaymentProvider>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            clubs,
            payments,
            provider,
            currency: currency.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateMembershipPaymentCommand,
    ) -> Result<PaymentIntentCreated, DomainError> {
        let club = self
            .clubs
            .find_by_id(&cmd.club_id)
            .await?
            .filter(|club| club.is_approved())
            .ok_or_else(|| DomainError::new(ErrorCode::NotFound, "Club not found or not approved"))?;

        if !club.requires_payment() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "This club is free to join",
            ));
        }

        let request = CreateIntentRequest::new(club.membership_fee.cents(), self.currency.clone())
            .with_metadata("type", "membership")
            .with_metadata("clubId", club.id.to_string())
            .with_metadata("userEmail", cmd.user.email.clone());

        let intent = self.provider.create_payment_intent(request).await.map_err(|e| {
            tracing::error!(club_id = %club.id, error = %e, "Membership payment intent failed");
            DomainError::from(e)
        })?;

        let payment =
            Payment::for_membership(cmd.user.email.clone(), club.id, club.membership_fee, &intent.id);
        let created = PaymentIntentCreated::new(intent, payment.id)?;
        self.payments.create(&payment).await?;

        tracing::info!(
            payment_id = %payment.id,
            club_id = %club.id,
            amount_cents = club.membership_fee.cents(),
            "Membership payment created"
        );
        Ok(created)
    }
}
