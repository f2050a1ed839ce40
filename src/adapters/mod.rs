//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Identity token verification (JWKS, mock)
//! - `http` - The axum REST API
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - sqlx repositories
//! - `stripe` - Payment intents (Stripe, mock)

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
