//! Axum router for club endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    all_clubs, create_club, featured_clubs, get_club, list_clubs, my_clubs, set_club_status,
    update_club,
};

/// Mounted at `/api/clubs`.
pub fn club_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clubs).post(create_club))
        .route("/featured", get(featured_clubs))
        .route("/manager/my-clubs", get(my_clubs))
        .route("/admin/all", get(all_clubs))
        .route("/:id", get(get_club).put(update_club))
        .route("/:id/status", patch(set_club_status))
}
