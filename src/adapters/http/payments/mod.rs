//! HTTP adapter for payments.
//!
//! Confirmation is pulled by the client; there is no processor webhook.
//!
//! - `POST /api/payments/create-membership-payment` - Intent for a club fee
//! - `POST /api/payments/create-event-payment` - Intent for an event fee
//! - `POST /api/payments/confirm-payment` - Read the intent back and record the outcome
//! - `GET /api/payments/my-payments` - Caller's payments
//! - `GET /api/payments/admin/all` - Every payment (admin)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
