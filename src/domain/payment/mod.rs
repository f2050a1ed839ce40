//! Payment domain module.
//!
//! Local records of processor payment intents for membership and event fees.

mod aggregate;
mod status;

pub use aggregate::{Payment, PaymentView};
pub use status::{PaymentStatus, PaymentType};
