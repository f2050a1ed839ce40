//! Liveness endpoint.

use axum::Json;

use super::message::MessageResponse;

/// GET /api/health
pub async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::new("ClubSphere API is running!"))
}
