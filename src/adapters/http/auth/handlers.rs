//! HTTP handlers for auth endpoints.

use axum::extract::{rejection::JsonRejection, Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::adapters::http::users::dto::UserMessageResponse;

use super::dto::{CurrentUserResponse, RegisterRequest};

/// POST /api/auth/register
///
/// Public: the caller has an identity-provider account but no local user yet.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let user = state.register_user_handler().handle(request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserMessageResponse::new("User registered successfully", user)),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_queries().current(&user).await?;
    Ok(Json(CurrentUserResponse { user: user.into() }))
}
