//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) are kept apart from the grouped query handlers
//! (read) of each resource.

pub mod handlers;
mod identity_resolver;

pub use handlers::*;
pub use identity_resolver::IdentityResolver;
