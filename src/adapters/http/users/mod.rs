//! HTTP adapter for user administration.
//!
//! - `GET /api/users` - List all users (admin)
//! - `PATCH /api/users/:id/role` - Change a user's role (admin)
//! - `DELETE /api/users/:id` - Delete a user (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::UserResponse;
pub use routes::user_routes;
