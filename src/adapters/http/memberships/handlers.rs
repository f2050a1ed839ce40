//! HTTP handlers for membership endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::parse_id;
use crate::adapters::http::state::AppState;
use crate::application::JoinClubCommand;

use super::dto::{JoinRequest, MembershipMessageResponse, MembershipResponse};

/// POST /api/memberships/join/:clubId
pub async fn join_club(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(club_id): Path<String>,
    body: Option<Json<JoinRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let cmd = JoinClubCommand {
        user,
        club_id: parse_id(&club_id, "Club")?,
        payment_id: request.payment_id,
    };

    let membership = state.join_club_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(MembershipMessageResponse {
            message: "Successfully joined the club".to_string(),
            membership: membership.into(),
        }),
    ))
}

/// GET /api/memberships/my-memberships
pub async fn my_memberships(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let memberships = state.membership_queries().mine(&user).await?;
    Ok(Json(
        memberships
            .into_iter()
            .map(MembershipResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/memberships/club/:clubId
pub async fn club_members(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let club_id = parse_id(&club_id, "Club")?;
    let members = state
        .membership_queries()
        .club_members(&user, &club_id)
        .await?;
    Ok(Json(
        members
            .into_iter()
            .map(MembershipResponse::from)
            .collect::<Vec<_>>(),
    ))
}
