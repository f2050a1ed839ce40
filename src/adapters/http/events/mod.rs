//! HTTP adapter for events and event registration.
//!
//! ## Public
//! - `GET /api/events` - Events of approved clubs, searchable and paginated
//! - `GET /api/events/upcoming` - Next events of approved clubs
//! - `GET /api/events/:id` - One event with its club
//!
//! ## Club manager
//! - `POST /api/events`, `PUT /api/events/:id`, `DELETE /api/events/:id`
//! - `GET /api/events/manager/my-events`
//!
//! ## Member
//! - `POST /api/events/:id/register`, `DELETE /api/events/:id/register`
//! - `GET /api/events/:id/registration-status` (any signed-in user)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::event_routes;
