//! Event registration entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ClubId, EventId, RegistrationId, Timestamp, ValidationError};

/// Status of a registration row.
///
/// Unregistering deletes the row, so `Cancelled` is only reachable through
/// direct data edits. Cancelled rows do not count toward capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Registered,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(RegistrationStatus::Registered),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown registration status '{}'", other),
            )),
        }
    }
}

/// A user's enrollment in one event. Unique per (event, user email).
#[derive(Debug, Clone, PartialEq)]
pub struct EventRegistration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub user_email: String,
    pub club_id: ClubId,
    pub status: RegistrationStatus,

    /// Local payment id the client supplied, stored unverified.
    pub payment_id: Option<String>,

    pub created_at: Timestamp,
}

impl EventRegistration {
    pub fn new(
        event_id: EventId,
        club_id: ClubId,
        user_email: impl Into<String>,
        payment_id: Option<String>,
    ) -> Self {
        Self {
            id: RegistrationId::new(),
            event_id,
            user_email: user_email.into(),
            club_id,
            status: RegistrationStatus::Registered,
            payment_id,
            created_at: Timestamp::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RegistrationStatus::Registered
    }
}
