//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::PaymentIntentCreated;
use crate::domain::foundation::{ClubId, EventId, Money, PaymentId, Timestamp};
use crate::domain::payment::{Payment, PaymentStatus, PaymentType, PaymentView};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipPaymentRequest {
    #[serde(default)]
    pub club_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPaymentRequest {
    #[serde(default)]
    pub event_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    #[serde(default)]
    pub payment_intent_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// What the client needs to complete the payment in the processor's UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_id: PaymentId,
}

impl From<PaymentIntentCreated> for PaymentIntentResponse {
    fn from(created: PaymentIntentCreated) -> Self {
        Self {
            client_secret: created.client_secret,
            payment_id: created.payment_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub user_email: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub club_id: ClubId,
    pub event_id: Option<EventId>,
    pub stripe_payment_intent_id: String,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            user_email: payment.user_email,
            amount: payment.amount,
            payment_type: payment.payment_type,
            club_id: payment.club_id,
            event_id: payment.event_id,
            stripe_payment_intent_id: payment.stripe_payment_intent_id,
            status: payment.status,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
            club_name: None,
            event_title: None,
        }
    }
}

impl From<PaymentView> for PaymentResponse {
    fn from(view: PaymentView) -> Self {
        Self {
            club_name: view.club_name,
            event_title: view.event_title,
            ..view.payment.into()
        }
    }
}

/// `{message, payment}` returned by a successful confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmPaymentResponse {
    pub message: String,
    pub payment: PaymentResponse,
}

pub fn payment_list(payments: Vec<PaymentView>) -> Vec<PaymentResponse> {
    payments.into_iter().map(PaymentResponse::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_type_serializes_as_type() {
        let payment = Payment::for_membership(
            "m@example.com",
            ClubId::new(),
            Money::from_cents(1500).unwrap(),
            "pi_1",
        );
        let json = serde_json::to_value(PaymentResponse::from(PaymentView {
            payment,
            club_name: Some("Chess".to_string()),
            event_title: None,
        }))
        .unwrap();

        assert_eq!(json["type"], "membership");
        assert_eq!(json["amount"], 15.0);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["clubName"], "Chess");
        assert!(json.get("eventTitle").is_none());
        assert_eq!(json["stripePaymentIntentId"], "pi_1");
    }
}
