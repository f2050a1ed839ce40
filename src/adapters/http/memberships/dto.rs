//! HTTP DTOs for membership endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::clubs::ClubSummaryResponse;
use crate::domain::foundation::{ClubId, MembershipId, Timestamp};
use crate::domain::membership::{Membership, MembershipStatus, MembershipWithClub};

/// Optional body of a join request; paid clubs need the local payment id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub payment_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: MembershipId,
    pub user_email: String,
    pub club_id: ClubId,
    pub status: MembershipStatus,
    pub payment_id: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ClubSummaryResponse>,
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        Self {
            id: membership.id,
            user_email: membership.user_email,
            club_id: membership.club_id,
            status: membership.status,
            payment_id: membership.payment_id,
            expires_at: membership.expires_at,
            created_at: membership.created_at,
            club: None,
        }
    }
}

impl From<MembershipWithClub> for MembershipResponse {
    fn from(view: MembershipWithClub) -> Self {
        Self {
            club: Some(view.club.into()),
            ..view.membership.into()
        }
    }
}

/// `{message, membership}` returned by a successful join.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipMessageResponse {
    pub message: String,
    pub membership: MembershipResponse,
}
