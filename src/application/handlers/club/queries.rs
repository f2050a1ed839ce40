//! Read-side club handlers.

use std::sync::Arc;

use crate::domain::club::{Club, ClubQuery, ClubStatus, FEATURED_LIMIT};
use crate::domain::foundation::{require_role, AuthenticatedUser, ClubId, DomainError, Page, Role};
use crate::ports::ClubRepository;

pub struct ClubQueryHandler {
    clubs: Arc<dyn ClubRepository>,
}

impl ClubQueryHandler {
    pub fn new(clubs: Arc<dyn ClubRepository>) -> Self {
        Self { clubs }
    }

    /// Public listing of approved clubs.
    pub async fn list_approved(&self, query: &ClubQuery) -> Result<Page<Club>, DomainError> {
        self.clubs.list_approved(query).await
    }

    pub async fn featured(&self) -> Result<Vec<Club>, DomainError> {
        self.clubs.list_featured(FEATURED_LIMIT).await
    }

    /// Any club by id, whatever its status.
    pub async fn get(&self, id: &ClubId) -> Result<Club, DomainError> {
        self.clubs
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Club"))
    }

    /// The caller's own clubs in every status.
    pub async fn managed_by(&self, user: &AuthenticatedUser) -> Result<Vec<Club>, DomainError> {
        require_role(user, &[Role::ClubManager])?;
        self.clubs.list_by_manager(&user.email).await
    }

    /// Every club, optionally filtered by status. Admin only.
    pub async fn list_all(
        &self,
        user: &AuthenticatedUser,
        status: Option<ClubStatus>,
    ) -> Result<Vec<Club>, DomainError> {
        require_role(user, &[Role::Admin])?;
        self.clubs.list_all(status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        admin, manager, other_manager, seed_club, store,
    };
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn public_listing_hides_pending_clubs() {
        let store = store();
        seed_club(&store, 0, ClubStatus::Approved).await;
        seed_club(&store, 0, ClubStatus::Pending).await;
        let handler = ClubQueryHandler::new(store);

        let page = handler.list_approved(&ClubQuery::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].is_approved());
    }

    #[tokio::test]
    async fn get_returns_pending_club_or_not_found() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Pending).await;
        let handler = ClubQueryHandler::new(store);

        assert_eq!(handler.get(&club.id).await.unwrap().id, club.id);
        let err = handler.get(&ClubId::new()).await.unwrap_err();
        assert_eq!(err.message(), "Club not found");
    }

    #[tokio::test]
    async fn managed_by_scopes_to_caller() {
        let store = store();
        seed_club(&store, 0, ClubStatus::Pending).await;
        let handler = ClubQueryHandler::new(store);

        assert_eq!(handler.managed_by(&manager()).await.unwrap().len(), 1);
        assert!(handler.managed_by(&other_manager()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_listing_filters_and_is_admin_only() {
        let store = store();
        seed_club(&store, 0, ClubStatus::Approved).await;
        seed_club(&store, 0, ClubStatus::Pending).await;
        let handler = ClubQueryHandler::new(store);

        assert_eq!(handler.list_all(&admin(), None).await.unwrap().len(), 2);
        assert_eq!(
            handler
                .list_all(&admin(), Some(ClubStatus::Pending))
                .await
                .unwrap()
                .len(),
            1
        );
        let err = handler.list_all(&manager(), None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
