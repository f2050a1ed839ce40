//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler owns its role and ownership checks so the HTTP layer only
//! extracts input and maps results.

pub mod club;
pub mod event;
pub mod membership;
pub mod payment;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use club::*;
pub use event::*;
pub use membership::*;
pub use payment::*;
pub use user::*;
