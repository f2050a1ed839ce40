//! Axum router for event endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    create_event, delete_event, get_event, list_events, my_events, register_for_event,
    registration_status, unregister_from_event, update_event, upcoming_events,
};

/// Mounted at `/api/events`.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/upcoming", get(upcoming_events))
        .route("/manager/my-events", get(my_events))
        .route(
            "/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route(
            "/:id/register",
            post(register_for_event).delete(unregister_from_event),
        )
        .route("/:id/registration-status", get(registration_status))
}
