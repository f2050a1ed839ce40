//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, money, roles, errors, paging)
//! - `user` - Registered people and their roles
//! - `club` - Clubs and their approval workflow
//! - `event` - Club events and registrations
//! - `membership` - User-to-club memberships
//! - `payment` - Local records of processor payment intents

pub mod club;
pub mod event;
pub mod foundation;
pub mod membership;
pub mod payment;
pub mod user;
