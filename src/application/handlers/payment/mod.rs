//! Payment command and query handlers.

mod confirm_payment;
mod create_event_payment;
mod create_membership_payment;
mod queries;

pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler};
pub use create_event_payment::{CreateEventPaymentCommand, CreateEventPaymentHandler};
pub use create_membership_payment::{
    CreateMembershipPaymentCommand, CreateMembershipPaymentHandler,
};
pub use queries::PaymentQueryHandler;

use crate::domain::foundation::{DomainError, PaymentId};
use crate::ports::PaymentIntent;

/// What a client needs to finish paying: the processor's client secret and
/// the local payment id to quote on the follow-up join or register call.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentCreated {
    pub client_secret: String,
    pub payment_id: PaymentId,
}

impl PaymentIntentCreated {
    fn new(intent: PaymentIntent, payment_id: PaymentId) -> Result<Self, DomainError> {
        let client_secret = intent
            .client_secret
            .ok_or_else(|| DomainError::upstream("Payment processor returned no client secret"))?;
        Ok(Self {
            client_secret,
            payment_id,
        })
    }
}
