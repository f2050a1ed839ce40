use async_trait::async_trait;

use crate::domain::foundation::{ClubId, DomainError};
use crate::domain::membership::{Membership, MembershipWithClub};
use crate::ports::MembershipRepository;

use super::InMemoryStore;

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn join(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        if !state.clubs.contains_key(&membership.club_id) {
            return Err(DomainError::not_found("Club"));
        }
        let duplicate = state
            .memberships
            .iter()
            .any(|m| m.user_email == membership.user_email && m.club_id == membership.club_id);
        if duplicate {
            return Err(DomainError::conflict("Already a member of this club"));
        }

        state.memberships.push(membership.clone());
        if let Some(club) = state.clubs.get_mut(&membership.club_id) {
            club.member_count = club.member_count.saturating_add(1);
        }
        Ok(())
    }

    async fn find(&self, email: &str, club_id: &ClubId) -> Result<Option<Membership>, DomainError> {
        Ok(self
            .lock()?
            .memberships
            .iter()
            .find(|m| m.user_email == email && m.club_id == *club_id)
            .cloned())
    }

    async fn list_for_user(&self, email: &str) -> Result<Vec<MembershipWithClub>, DomainError> {
        let state = self.lock()?;
        let mut memberships: Vec<MembershipWithClub> = state
            .memberships
            .iter()
            .filter(|m| m.user_email == email)
            .filter_map(|m| {
                state.club_summary(&m.club_id).map(|club| MembershipWithClub {
                    membership: m.clone(),
                    club,
                })
            })
            .collect();
        memberships.sort_by(|a, b| b.membership.created_at.cmp(&a.membership.created_at));
        Ok(memberships)
    }

    async fn list_for_club(&self, club_id: &ClubId) -> Result<Vec<Membership>, DomainError> {
        let mut memberships: Vec<Membership> = self
            .lock()?
            .memberships
            .iter()
            .filter(|m| m.club_id == *club_id)
            .cloned()
            .collect();
        memberships.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(memberships)
    }
}
