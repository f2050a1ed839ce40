//! Club approval workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Approval status of a club.
///
/// Every club starts `Pending`. Only an admin moves it to `Approved` or
/// `Rejected`, and may flip between those two afterwards. Nothing returns a
/// club to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ClubStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubStatus::Pending => "pending",
            ClubStatus::Approved => "approved",
            ClubStatus::Rejected => "rejected",
        }
    }

    /// Only approved clubs are visible in public listings and can be joined.
    pub fn is_public(&self) -> bool {
        matches!(self, ClubStatus::Approved)
    }
}

impl fmt::Display for ClubStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClubStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClubStatus::Pending),
            "approved" => Ok(ClubStatus::Approved),
            "rejected" => Ok(ClubStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown club status '{}'", other),
            )),
        }
    }
}

impl StateMachine for ClubStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        !matches!(target, ClubStatus::Pending)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        vec![ClubStatus::Approved, ClubStatus::Rejected]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_pending() {
        assert_eq!(ClubStatus::default(), ClubStatus::Pending);
    }

    #[test]
    fn admin_decisions_are_reversible() {
        assert!(ClubStatus::Pending.can_transition_to(&ClubStatus::Approved));
        assert!(ClubStatus::Approved.can_transition_to(&ClubStatus::Rejected));
        assert!(ClubStatus::Rejected.can_transition_to(&ClubStatus::Approved));
    }

    #[test]
    fn nothing_returns_to_pending() {
        for status in [ClubStatus::Pending, ClubStatus::Approved, ClubStatus::Rejected] {
            assert!(status.transition_to(ClubStatus::Pending).is_err());
        }
    }

    #[test]
    fn only_approved_is_public() {
        assert!(ClubStatus::Approved.is_public());
        assert!(!ClubStatus::Pending.is_public());
        assert!(!ClubStatus::Rejected.is_public());
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("approved".parse::<ClubStatus>().unwrap(), ClubStatus::Approved);
        assert!("Approved".parse::<ClubStatus>().is_err());
    }
}
