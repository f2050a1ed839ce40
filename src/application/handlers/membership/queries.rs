//! Read-side membership handlers.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ClubId, DomainError, OwnedByEmail};
use crate::domain::membership::{Membership, MembershipWithClub};
use crate::ports::{ClubRepository, MembershipRepository};

pub struct MembershipQueryHandler {
    clubs: Arc<dyn ClubRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl MembershipQueryHandler {
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self { clubs, memberships }
    }

    /// The caller's memberships, newest first.
    pub async fn mine(&self, user: &AuthenticatedUser) -> Result<Vec<MembershipWithClub>, DomainError> {
        self.memberships.list_for_user(&user.email).await
    }

    /// Members of a club, visible to its manager and to admins.
    pub async fn club_members(
        &self,
        user: &AuthenticatedUser,
        club_id: &ClubId,
    ) -> Result<Vec<Membership>, DomainError> {
        let club = self
            .clubs
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Club"))?;

        if !user.is_admin() {
            club.check_ownership(user, "Access denied")?;
        }

        self.memberships.list_for_club(&club.id).await
    }
}
