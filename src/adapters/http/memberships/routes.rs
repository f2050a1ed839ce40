//! Axum router for membership endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{club_members, join_club, my_memberships};

/// Mounted at `/api/memberships`.
pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/join/:club_id", post(join_club))
        .route("/my-memberships", get(my_memberships))
        .route("/club/:club_id", get(club_members))
}
