//! HTTP adapter - the REST API.
//!
//! One module per resource, each with `dto`, `handlers` and `routes`, all
//! sharing `AppState` and the `ApiError` mapping. `router` assembles them
//! under `/api`.

pub mod auth;
pub mod clubs;
pub mod error;
pub mod events;
pub mod health;
pub mod memberships;
pub mod message;
pub mod middleware;
pub mod params;
pub mod payments;
pub mod router;
pub mod state;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ApiError, ErrorResponse};
pub use router::{app_router, with_layers};
pub use state::{AppState, Repositories};
