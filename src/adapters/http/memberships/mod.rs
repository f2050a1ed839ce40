//! HTTP adapter for club memberships.
//!
//! - `POST /api/memberships/join/:clubId` - Join an approved club
//! - `GET /api/memberships/my-memberships` - Caller's memberships with club details
//! - `GET /api/memberships/club/:clubId` - Members of a club (its manager or an admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::membership_routes;
