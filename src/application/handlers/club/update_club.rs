//! UpdateClubHandler - Command handler for a manager editing their club.

use std::sync::Arc;

use crate::domain::club::{Club, ClubUpdate};
use crate::domain::foundation::{
    require_role, AuthenticatedUser, ClubId, DomainError, OwnedByEmail, Role,
};
use crate::ports::ClubRepository;

#[derive(Debug, Clone)]
pub struct UpdateClubCommand {
    pub user: AuthenticatedUser,
    pub club_id: ClubId,
    pub update: ClubUpdate,
}

pub struct UpdateClubHandler {
    clubs: Arc<dyn ClubRepository>,
}

impl UpdateClubHandler {
    pub fn new(clubs: Arc<dyn ClubRepository>) -> Self {
        Self { clubs }
    }

    /// Applies a partial update. Status, manager and member count are never
    /// touched here.
    pub async fn handle(&self, cmd: UpdateClubCommand) -> Result<Club, DomainError> {
        require_role(&cmd.user, &[Role::ClubManager])?;

        let mut club = self
            .clubs
            .find_by_id(&cmd.club_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Club"))?;

        club.check_ownership(&cmd.user, "You can only update your own clubs")?;

        club.apply_update(cmd.update);
        self.clubs.update(&club).await?;

        tracing::info!(club_id = %club.id, "Club updated");
        // Status may have moved since the read above.
        Ok(self.clubs.find_by_id(&club.id).await?.unwrap_or(club))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::club::{SetClubStatusCommand, SetClubStatusHandler};
    use crate::application::handlers::test_support::{
        admin, manager, other_manager, seed_club, store,
    };
    use crate::domain::club::ClubStatus;
    use crate::domain::foundation::{ErrorCode, Money};

    #[tokio::test]
    async fn owner_updates_present_fields() {
        let store = store();
        let club = seed_club(&store, 1500, ClubStatus::Approved).await;
        let handler = UpdateClubHandler::new(store.clone());

        let updated = handler
            .handle(UpdateClubCommand {
                user: manager(),
                club_id: club.id,
                update: ClubUpdate {
                    location: Some("Chattogram".to_string()),
                    membership_fee: Some(Money::ZERO),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.location, "Chattogram");
        assert_eq!(updated.membership_fee, Money::ZERO);
        assert_eq!(updated.club_name, club.club_name);
        assert_eq!(updated.status, ClubStatus::Approved);
    }

    #[tokio::test]
    async fn approval_between_read_and_write_survives_the_edit() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Pending).await;

        // Manager's copy, read before the admin decides.
        let mut stale = store.find_by_id(&club.id).await.unwrap().unwrap();

        SetClubStatusHandler::new(store.clone())
            .handle(SetClubStatusCommand {
                user: admin(),
                club_id: club.id,
                status: "approved".to_string(),
            })
            .await
            .unwrap();

        stale.apply_update(ClubUpdate {
            description: Some("Now with weekly meetups".to_string()),
            ..Default::default()
        });
        store.update(&stale).await.unwrap();

        let stored = store.find_by_id(&club.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ClubStatus::Approved);
        assert_eq!(stored.description, "Now with weekly meetups");
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_club_unchanged() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let handler = UpdateClubHandler::new(store.clone());

        let err = handler
            .handle(UpdateClubCommand {
                user: other_manager(),
                club_id: club.id,
                update: ClubUpdate {
                    club_name: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.message(), "You can only update your own clubs");
        let stored = store.find_by_id(&club.id).await.unwrap().unwrap();
        assert_eq!(stored.club_name, club.club_name);
    }

    #[tokio::test]
    async fn missing_club_is_not_found() {
        let handler = UpdateClubHandler::new(store());
        let err = handler
            .handle(UpdateClubCommand {
                user: manager(),
                club_id: ClubId::new(),
                update: ClubUpdate::default(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message(), "Club not found");
    }
}
