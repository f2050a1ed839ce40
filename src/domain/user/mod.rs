//! User domain module.

mod aggregate;

pub use aggregate::User;
