//! HTTP handlers for user administration endpoints.

use axum::extract::{rejection::JsonRejection, Json, Path, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::message::MessageResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::params::parse_id;
use crate::adapters::http::state::AppState;
use crate::application::{ChangeUserRoleCommand, DeleteUserCommand};

use super::dto::{ChangeRoleRequest, UserMessageResponse, UserResponse};

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_queries().list_all(&user).await?;
    Ok(Json(
        users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
    ))
}

/// PATCH /api/users/:id/role
pub async fn change_user_role(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    body: Result<Json<ChangeRoleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let cmd = ChangeUserRoleCommand {
        actor: user,
        user_id: parse_id(&id, "User")?,
        role: request.role,
    };

    let updated = state.change_user_role_handler().handle(cmd).await?;
    Ok(Json(UserMessageResponse::new(
        "User role updated successfully",
        updated,
    )))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteUserCommand {
        actor: user,
        user_id: parse_id(&id, "User")?,
    };

    state.delete_user_handler().handle(cmd).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
