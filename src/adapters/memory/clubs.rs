use async_trait::async_trait;

use crate::domain::club::{Club, ClubQuery, ClubSortField, ClubStatus};
use crate::domain::foundation::{ClubId, DomainError, Page, Timestamp};
use crate::ports::ClubRepository;

use super::{directed, paginate, InMemoryStore};

fn compare(a: &Club, b: &Club, field: ClubSortField) -> std::cmp::Ordering {
    match field {
        ClubSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ClubSortField::ClubName => a.club_name.cmp(&b.club_name),
        ClubSortField::MemberCount => a.member_count.cmp(&b.member_count),
        ClubSortField::MembershipFee => a.membership_fee.cmp(&b.membership_fee),
    }
}

#[async_trait]
impl ClubRepository for InMemoryStore {
    async fn create(&self, club: &Club) -> Result<(), DomainError> {
        self.lock()?.clubs.insert(club.id, club.clone());
        Ok(())
    }

    async fn update(&self, club: &Club) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let stored = state
            .clubs
            .get_mut(&club.id)
            .ok_or_else(|| DomainError::not_found("Club"))?;
        let (status, member_count) = (stored.status, stored.member_count);
        *stored = Club {
            status,
            member_count,
            ..club.clone()
        };
        Ok(())
    }

    async fn update_status(
        &self,
        id: &ClubId,
        status: ClubStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let stored = state
            .clubs
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("Club"))?;
        stored.status = status;
        stored.updated_at = updated_at;
        Ok(())
    }

    async fn find_by_id(&self, id: &ClubId) -> Result<Option<Club>, DomainError> {
        Ok(self.lock()?.clubs.get(id).cloned())
    }

    async fn list_approved(&self, query: &ClubQuery) -> Result<Page<Club>, DomainError> {
        let mut clubs: Vec<Club> = self
            .lock()?
            .clubs
            .values()
            .filter(|c| query.matches(c))
            .cloned()
            .collect();
        clubs.sort_by(|a, b| {
            directed(compare(a, b, query.sort), query.order).then_with(|| a.id.cmp(&b.id))
        });
        Ok(paginate(clubs, query.page))
    }

    async fn list_featured(&self, limit: usize) -> Result<Vec<Club>, DomainError> {
        let mut clubs: Vec<Club> = self
            .lock()?
            .clubs
            .values()
            .filter(|c| c.is_approved())
            .cloned()
            .collect();
        clubs.sort_by(|a, b| {
            b.member_count
                .cmp(&a.member_count)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        clubs.truncate(limit);
        Ok(clubs)
    }

    async fn list_by_manager(&self, email: &str) -> Result<Vec<Club>, DomainError> {
        let mut clubs: Vec<Club> = self
            .lock()?
            .clubs
            .values()
            .filter(|c| c.manager_email == email)
            .cloned()
            .collect();
        clubs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clubs)
    }

    async fn list_all(&self, status: Option<ClubStatus>) -> Result<Vec<Club>, DomainError> {
        let mut clubs: Vec<Club> = self
            .lock()?
            .clubs
            .values()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        clubs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clubs)
    }
}
