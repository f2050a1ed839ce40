//! SetClubStatusHandler - Admin approval workflow.

use std::sync::Arc;

use crate::domain::club::{Club, ClubStatus};
use crate::domain::foundation::{
    require_role, AuthenticatedUser, ClubId, DomainError, ErrorCode, Role,
};
use crate::ports::ClubRepository;

#[derive(Debug, Clone)]
pub struct SetClubStatusCommand {
    pub user: AuthenticatedUser,
    pub club_id: ClubId,

    /// Raw status as sent by the client; only `approved` and `rejected` are
    /// accepted.
    pub status: String,
}

pub struct SetClubStatusHandler {
    clubs: Arc<dyn ClubRepository>,
}

impl SetClubStatusHandler {
    pub fn new(clubs: Arc<dyn ClubRepository>) -> Self {
        Self { clubs }
    }

    pub async fn handle(&self, cmd: SetClubStatusCommand) -> Result<Club, DomainError> {
        require_role(&cmd.user, &[Role::Admin])?;

        let status = match cmd.status.parse::<ClubStatus>() {
            Ok(status @ (ClubStatus::Approved | ClubStatus::Rejected)) => status,
            _ => return Err(DomainError::new(ErrorCode::ValidationFailed, "Invalid status")),
        };

        let mut club = self
            .clubs
            .find_by_id(&cmd.club_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Club"))?;

        club.set_status(status)?;
        self.clubs
            .update_status(&club.id, club.status, club.updated_at)
            .await?;

        tracing::info!(
            club_id = %club.id,
            status = %status.as_str(),
            admin = %cmd.user.email,
            "Club status changed"
        );
        Ok(club)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{admin, manager, seed_club, store};

    fn command(club_id: ClubId, status: &str) -> SetClubStatusCommand {
        SetClubStatusCommand {
            user: admin(),
            club_id,
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn admin_approves_pending_club() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Pending).await;
        let handler = SetClubStatusHandler::new(store.clone());

        let updated = handler.handle(command(club.id, "approved")).await.unwrap();

        assert_eq!(updated.status, ClubStatus::Approved);
        let stored = store.find_by_id(&club.id).await.unwrap().unwrap();
        assert!(stored.is_approved());
    }

    #[tokio::test]
    async fn pending_and_unknown_statuses_are_invalid() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let handler = SetClubStatusHandler::new(store);

        for status in ["pending", "archived", ""] {
            let err = handler.handle(command(club.id, status)).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationFailed);
            assert_eq!(err.message(), "Invalid status");
        }
    }

    #[tokio::test]
    async fn only_admins_change_status() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Pending).await;
        let handler = SetClubStatusHandler::new(store.clone());

        let err = handler
            .handle(SetClubStatusCommand {
                user: manager(),
                club_id: club.id,
                status: "approved".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        let stored = store.find_by_id(&club.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ClubStatus::Pending);
    }

    #[tokio::test]
    async fn missing_club_is_not_found() {
        let handler = SetClubStatusHandler::new(store());
        let err = handler
            .handle(command(ClubId::new(), "rejected"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
