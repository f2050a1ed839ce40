//! API router assembly.
//!
//! Resource routers are nested under `/api`. The bearer-auth middleware runs
//! for every request; only handlers that take `RequireAuth` insist on a user.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{middleware, Json, Router};
use http::{header, HeaderValue, Method, StatusCode};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::auth::auth_routes;
use super::clubs::club_routes;
use super::events::event_routes;
use super::health::health_check;
use super::memberships::membership_routes;
use super::message::MessageResponse;
use super::middleware::auth_middleware;
use super::payments::payment_routes;
use super::state::AppState;
use super::users::user_routes;

/// Builds the `/api` router with authentication and the 404 fallback.
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/clubs", club_routes())
        .nest("/events", event_routes())
        .nest("/memberships", membership_routes())
        .nest("/payments", payment_routes());

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

/// Adds request tracing, CORS and the request timeout.
pub fn with_layers(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

/// An empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("Route not found")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::test_support::TestApp;
    use axum::body::Body;
    use http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_reports_running() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "ClubSphere API is running!");
    }

    #[tokio::test]
    async fn unknown_route_is_404_with_message() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/nowhere", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route not found");
    }

    #[tokio::test]
    async fn cors_preflight_allows_configured_origin() {
        let router = Router::new()
            .route("/api/health", get(health_check));
        let server = ServerConfig {
            cors_origins: Some("http://localhost:5173".to_string()),
            ..ServerConfig::default()
        };
        let app = with_layers(router, &server);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }
}
