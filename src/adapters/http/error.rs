//! Mapping of domain failures to HTTP responses.
//!
//! Every handler returns `Result<_, ApiError>`; this is the only place that
//! decides status codes and error bodies.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Message clients see for persistence and internal failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(self.0.code)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::validation("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(DomainError::validation("query", rejection.body_text()))
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidState => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict | ErrorCode::CapacityReached => StatusCode::CONFLICT,
        ErrorCode::UpstreamFailure => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err = self.0;

        let body = if err.code.is_internal() {
            tracing::error!(code = %err.code, details = ?err.details, "{}", err.message);
            ErrorResponse::new(err.code.to_string(), INTERNAL_ERROR_MESSAGE)
        } else {
            if err.code == ErrorCode::UpstreamFailure {
                tracing::error!(details = ?err.details, "{}", err.message);
            } else {
                tracing::warn!(code = %err.code, status = status.as_u16(), "{}", err.message);
            }
            let mut body = ErrorResponse::new(err.code.to_string(), err.message);
            if !err.details.is_empty() {
                body = body.with_details(serde_json::json!(err.details));
            }
            body
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn status_mapping_follows_error_kind() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::InvalidState), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::CapacityReached), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::UpstreamFailure), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn domain_message_reaches_client() {
        let response = ApiError::from(DomainError::capacity("Event is full")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = body_json(response).await;
        assert_eq!(json["errorCode"], "CAPACITY_REACHED");
        assert_eq!(json["message"], "Event is full");
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let err = DomainError::database("relation \"clubs\" does not exist")
            .with_detail("query", "SELECT");
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn validation_details_are_kept() {
        let response =
            ApiError::from(DomainError::validation("location", "location is required"))
                .into_response();
        let json = body_json(response).await;
        assert_eq!(json["details"]["field"], "location");
    }
}
