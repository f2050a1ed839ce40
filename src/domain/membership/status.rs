//! Membership status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Status of a user's membership in a club.
///
/// Joining always produces `Active`. `Expired` and `PendingPayment` are
/// carried for stored data; no flow in this service produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MembershipStatus {
    #[default]
    Active,
    Expired,
    PendingPayment,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Expired => "expired",
            MembershipStatus::PendingPayment => "pendingPayment",
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(MembershipStatus::Active),
            "expired" => Ok(MembershipStatus::Expired),
            "pendingPayment" => Ok(MembershipStatus::PendingPayment),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown membership status '{}'", other),
            )),
        }
    }
}
