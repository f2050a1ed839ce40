//! Payment entity.
//!
//! One row per processor intent. Rows are created `Pending` when the intent
//! is created and only move when the owner asks for confirmation; nothing
//! here creates memberships or registrations.

use crate::domain::foundation::{
    ClubId, DomainError, EventId, Money, PaymentId, StateMachine, Timestamp,
};

use super::{PaymentStatus, PaymentType};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub user_email: String,
    pub amount: Money,
    pub payment_type: PaymentType,
    pub club_id: ClubId,
    pub event_id: Option<EventId>,
    pub stripe_payment_intent_id: String,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Records a new pending membership payment.
    pub fn for_membership(
        user_email: impl Into<String>,
        club_id: ClubId,
        amount: Money,
        intent_id: impl Into<String>,
    ) -> Self {
        Self::pending(user_email, PaymentType::Membership, club_id, None, amount, intent_id)
    }

    /// Records a new pending event payment.
    pub fn for_event(
        user_email: impl Into<String>,
        club_id: ClubId,
        event_id: EventId,
        amount: Money,
        intent_id: impl Into<String>,
    ) -> Self {
        Self::pending(user_email, PaymentType::Event, club_id, Some(event_id), amount, intent_id)
    }

    fn pending(
        user_email: impl Into<String>,
        payment_type: PaymentType,
        club_id: ClubId,
        event_id: Option<EventId>,
        amount: Money,
        intent_id: impl Into<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: PaymentId::new(),
            user_email: user_email.into(),
            amount,
            payment_type,
            club_id,
            event_id,
            stripe_payment_intent_id: intent_id.into(),
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves to `status`. Returns false when the row was already there.
    pub fn transition(&mut self, status: PaymentStatus) -> Result<bool, DomainError> {
        if self.status == status {
            return Ok(false);
        }
        self.status = self.status.transition_to(status)?;
        self.updated_at = Timestamp::now();
        Ok(true)
    }

    pub fn is_owned_by_email(&self, email: &str) -> bool {
        self.user_email == email
    }
}

/// A payment with the display names of what it paid for.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentView {
    pub payment: Payment,
    pub club_name: Option<String>,
    pub event_title: Option<String>,
}
