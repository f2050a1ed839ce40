//! HTTP handlers for event endpoints.

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Json, Path, Query, State,
};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::message::MessageResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::parse_id;
use crate::adapters::http::state::AppState;
use crate::application::{
    CreateEventCommand, DeleteEventCommand, RegisterForEventCommand, UnregisterFromEventCommand,
    UpdateEventCommand,
};

use super::dto::{
    event_list, CreateEventRequest, EventListParams, EventMessageResponse, EventResponse,
    RegisterRequest, RegistrationMessageResponse, RegistrationResponse, UpdateEventRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Public
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    params: Result<Query<EventListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;

    let page = state.event_queries().list_public(&params.into_query()).await?;
    Ok(Json(page.map(EventResponse::from)))
}

/// GET /api/events/upcoming
pub async fn upcoming_events(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = state.event_queries().upcoming().await?;
    Ok(Json(event_list(events)))
}

/// GET /api/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state.event_queries().get(&parse_id(&id, "Event")?).await?;
    Ok(Json(EventResponse::from(event)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Club manager
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = CreateEventCommand {
        user,
        fields: request.into_new_event()?,
    };

    let event = state.create_event_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(EventMessageResponse::new("Event created successfully", event)),
    ))
}

/// PUT /api/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    body: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = UpdateEventCommand {
        user,
        event_id: parse_id(&id, "Event")?,
        update: request.into_update()?,
    };

    let event = state.update_event_handler().handle(cmd).await?;
    Ok(Json(EventMessageResponse::new("Event updated successfully", event)))
}

/// DELETE /api/events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteEventCommand {
        user,
        event_id: parse_id(&id, "Event")?,
    };

    state.delete_event_handler().handle(cmd).await?;
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

/// GET /api/events/manager/my-events
pub async fn my_events(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let events = state.event_queries().managed_by(&user).await?;
    Ok(Json(event_list(events)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Registration
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/events/:id/register
///
/// The body is optional; a paid event's client sends the local payment id.
pub async fn register_for_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    body: Option<Json<RegisterRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let cmd = RegisterForEventCommand {
        user,
        event_id: parse_id(&id, "Event")?,
        payment_id: request.payment_id,
    };

    let registration = state.register_for_event_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationMessageResponse {
            message: "Successfully registered for event".to_string(),
            registration: registration.into(),
        }),
    ))
}

/// DELETE /api/events/:id/register
pub async fn unregister_from_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UnregisterFromEventCommand {
        user,
        event_id: parse_id(&id, "Event")?,
    };

    state.unregister_from_event_handler().handle(cmd).await?;
    Ok(Json(MessageResponse::new("Successfully unregistered from event")))
}

/// GET /api/events/:id/registration-status
///
/// The caller's live registration, or `null`.
pub async fn registration_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event_id = parse_id(&id, "Event")?;
    let registration = state
        .event_queries()
        .registration_status(&user, &event_id)
        .await?;
    Ok(Json(registration.map(RegistrationResponse::from)))
}
