//! Axum router for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    all_payments, confirm_payment, create_event_payment, create_membership_payment, my_payments,
};

/// Mounted at `/api/payments`. Every route needs a signed-in user.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-membership-payment", post(create_membership_payment))
        .route("/create-event-payment", post(create_event_payment))
        .route("/confirm-payment", post(confirm_payment))
        .route("/my-payments", get(my_payments))
        .route("/admin/all", get(all_payments))
}
