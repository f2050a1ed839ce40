//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects the user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, keeping it provider-agnostic.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser (or the AuthError) into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! Public routes never look at the extensions, so a stale token sent to a
//! public listing does not fail the request.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Why a presented token was not accepted. Stored in request extensions for
/// `RequireAuth` to report.
#[derive(Debug, Clone)]
struct AuthFailure(AuthError);

/// Authentication middleware that validates Bearer tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the `SessionValidator` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On failure, injects the failure so protected handlers can report it
/// 5. On missing token, continues without injecting anything
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);

    if let Some(token) = token {
        match validator.validate(&token).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, role = %user.role, "Request authenticated");
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                if let AuthError::ServiceUnavailable(msg) = &e {
                    tracing::error!("Auth service unavailable: {}", msg);
                }
                request.extensions_mut().insert(AuthFailure(e));
            }
        }
    }

    next.run(request).await
}

/// Extractor that requires authentication.
///
/// If the auth middleware did not inject a user, returns 401 (or 503 when
/// the identity provider could not be reached).
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(RequireAuth(user.clone()));
        }
        match parts.extensions.get::<AuthFailure>() {
            Some(AuthFailure(e)) => Err(AuthRejection::Rejected(e.clone())),
            None => Err(AuthRejection::Unauthenticated),
        }
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No token was provided.
    Unauthenticated,

    /// A token was provided but not accepted.
    Rejected(AuthError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", "No token provided")
            }
            AuthRejection::Rejected(AuthError::TokenExpired) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Token expired")
            }
            AuthRejection::Rejected(AuthError::UserNotFound) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "User not found")
            }
            AuthRejection::Rejected(AuthError::ServiceUnavailable(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AUTH_UNAVAILABLE",
                "Authentication service unavailable",
            ),
            AuthRejection::Rejected(AuthError::InvalidToken) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid token")
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
