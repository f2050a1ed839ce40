//! HTTP adapter for sign-up and the current-user lookup.
//!
//! - `POST /api/auth/register` - Create the local user after identity-provider sign-up
//! - `GET /api/auth/me` - Current user

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
