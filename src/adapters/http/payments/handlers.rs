//! HTTP handlers for payment endpoints.

use axum::extract::{rejection::JsonRejection, Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::parse_id;
use crate::adapters::http::state::AppState;
use crate::application::{
    ConfirmPaymentCommand, CreateEventPaymentCommand, CreateMembershipPaymentCommand,
};
use crate::domain::foundation::DomainError;

use super::dto::{
    payment_list, ConfirmPaymentRequest, ConfirmPaymentResponse, EventPaymentRequest,
    MembershipPaymentRequest, PaymentIntentResponse,
};

/// POST /api/payments/create-membership-payment
pub async fn create_membership_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<MembershipPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = CreateMembershipPaymentCommand {
        user,
        club_id: parse_id(&request.club_id, "Club")?,
    };

    let created = state.create_membership_payment_handler().handle(cmd).await?;
    Ok(Json(PaymentIntentResponse::from(created)))
}

/// POST /api/payments/create-event-payment
pub async fn create_event_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<EventPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = CreateEventPaymentCommand {
        user,
        event_id: parse_id(&request.event_id, "Event")?,
    };

    let created = state.create_event_payment_handler().handle(cmd).await?;
    Ok(Json(PaymentIntentResponse::from(created)))
}

/// POST /api/payments/confirm-payment
pub async fn confirm_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<ConfirmPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let payment_intent_id = request.payment_intent_id.trim().to_string();
    if payment_intent_id.is_empty() {
        return Err(DomainError::validation(
            "paymentIntentId",
            "paymentIntentId is required",
        )
        .into());
    }

    let payment = state
        .confirm_payment_handler()
        .handle(ConfirmPaymentCommand {
            user,
            payment_intent_id,
        })
        .await?;
    Ok(Json(ConfirmPaymentResponse {
        message: "Payment confirmed successfully".to_string(),
        payment: payment.into(),
    }))
}

/// GET /api/payments/my-payments
pub async fn my_payments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.payment_queries().mine(&user).await?;
    Ok(Json(payment_list(payments)))
}

/// GET /api/payments/admin/all
pub async fn all_payments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.payment_queries().all(&user).await?;
    Ok(Json(payment_list(payments)))
}
