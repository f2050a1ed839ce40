//! HTTP adapter for clubs.
//!
//! ## Public
//! - `GET /api/clubs` - Approved clubs, searchable and paginated
//! - `GET /api/clubs/featured` - Six most-joined approved clubs
//! - `GET /api/clubs/:id` - One club
//!
//! ## Club manager
//! - `POST /api/clubs` - Create a club (starts pending)
//! - `PUT /api/clubs/:id` - Update an owned club
//! - `GET /api/clubs/manager/my-clubs` - Owned clubs in every status
//!
//! ## Admin
//! - `GET /api/clubs/admin/all?status=` - Every club
//! - `PATCH /api/clubs/:id/status` - Approve or reject

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ClubSummaryResponse;
pub use routes::club_routes;
