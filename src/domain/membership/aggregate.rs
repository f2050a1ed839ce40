//! Membership entity.
//!
//! A membership links one user email to one club. The pair is unique; the
//! database constraint is the authority and the application pre-check only
//! produces a friendlier error.

use crate::domain::club::ClubSummary;
use crate::domain::foundation::{ClubId, MembershipId, Timestamp};

use super::MembershipStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub id: MembershipId,
    pub user_email: String,
    pub club_id: ClubId,
    pub status: MembershipStatus,

    /// Local payment id the client supplied when joining a paid club. Its
    /// presence is checked, its success is not.
    pub payment_id: Option<String>,

    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Membership {
    /// Creates an active membership.
    pub fn activate(
        user_email: impl Into<String>,
        club_id: ClubId,
        payment_id: Option<String>,
    ) -> Self {
        Self {
            id: MembershipId::new(),
            user_email: user_email.into(),
            club_id,
            status: MembershipStatus::Active,
            payment_id,
            expires_at: None,
            created_at: Timestamp::now(),
        }
    }
}

/// A membership with its club's display fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipWithClub {
    pub membership: Membership,
    pub club: ClubSummary,
}
