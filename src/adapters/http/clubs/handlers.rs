//! HTTP handlers for club endpoints.

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Json, Path, Query, State,
};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::parse_id;
use crate::adapters::http::state::AppState;
use crate::application::{CreateClubCommand, SetClubStatusCommand, UpdateClubCommand};

use super::dto::{
    club_list, AdminClubParams, ClubListParams, ClubMessageResponse, ClubResponse,
    ClubStatusRequest, CreateClubRequest, UpdateClubRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Public
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/clubs
pub async fn list_clubs(
    State(state): State<AppState>,
    params: Result<Query<ClubListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let query = params.into_query()?;

    let page = state.club_queries().list_approved(&query).await?;
    Ok(Json(page.map(ClubResponse::from)))
}

/// GET /api/clubs/featured
pub async fn featured_clubs(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let clubs = state.club_queries().featured().await?;
    Ok(Json(club_list(clubs)))
}

/// GET /api/clubs/:id
pub async fn get_club(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let club = state.club_queries().get(&parse_id(&id, "Club")?).await?;
    Ok(Json(ClubResponse::from(club)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Club manager
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/clubs
pub async fn create_club(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<CreateClubRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = CreateClubCommand {
        user,
        fields: request.into_new_club()?,
    };

    let club = state.create_club_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(ClubMessageResponse::new(
            "Club created successfully and pending approval",
            club,
        )),
    ))
}

/// PUT /api/clubs/:id
pub async fn update_club(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    body: Result<Json<UpdateClubRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = UpdateClubCommand {
        user,
        club_id: parse_id(&id, "Club")?,
        update: request.into_update()?,
    };

    let club = state.update_club_handler().handle(cmd).await?;
    Ok(Json(ClubMessageResponse::new("Club updated successfully", club)))
}

/// GET /api/clubs/manager/my-clubs
pub async fn my_clubs(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let clubs = state.club_queries().managed_by(&user).await?;
    Ok(Json(club_list(clubs)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/clubs/admin/all
pub async fn all_clubs(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    params: Result<Query<AdminClubParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let status = params.status_filter()?;

    let clubs = state.club_queries().list_all(&user, status).await?;
    Ok(Json(club_list(clubs)))
}

/// PATCH /api/clubs/:id/status
pub async fn set_club_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    body: Result<Json<ClubStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = SetClubStatusCommand {
        user,
        club_id: parse_id(&id, "Club")?,
        status: request.status,
    };

    let club = state.set_club_status_handler().handle(cmd).await?;
    let message = format!("Club {} successfully", club.status);
    Ok(Json(ClubMessageResponse::new(message, club)))
}
