//! ClubSphere - club membership and event management API.
//!
//! Managers create clubs (approved by admins) and schedule events; members
//! join clubs and register for events, paying through Stripe where a fee
//! applies.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
