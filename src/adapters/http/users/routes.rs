//! Axum router for user administration endpoints.

use axum::{
    routing::{delete, get, patch},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{change_user_role, delete_user, list_users};

/// Mounted at `/api/users`. Every route is admin only.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/role", patch(change_user_role))
        .route("/:id", delete(delete_user))
}
