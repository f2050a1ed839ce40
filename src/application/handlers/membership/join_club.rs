//! JoinClubHandler - Command handler for a user joining a club.
//!
//! Payment gating only checks that the client supplied a payment id for a
//! paid club. Whether that payment succeeded is not verified here; clients
//! confirm the payment first and then join.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ClubId, DomainError, ErrorCode};
use crate::domain::membership::Membership;
use crate::ports::{ClubRepository, MembershipRepository};

#[derive(Debug, Clone)]
pub struct JoinClubCommand {
    pub user: AuthenticatedUser,
    pub club_id: ClubId,
    pub payment_id: Option<String>,
}

pub struct JoinClubHandler {
    clubs: Arc<dyn ClubRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl JoinClubHandler {
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self { clubs, memberships }
    }

    /// # Errors
    ///
    /// - `NotFound` if the club is missing or not approved
    /// - `Conflict` if the caller is already a member
    /// - `ValidationFailed` if the club charges a fee and no payment id was given
    pub async fn handle(&self, cmd: JoinClubCommand) -> Result<Membership, DomainError> {
        let club = self
            .clubs
            .find_by_id(&cmd.club_id)
            .await?
            .filter(|club| club.is_approved())
            .ok_or_else(|| DomainError::new(ErrorCode::NotFound, "Club not found or not approved"))?;

        if self
            .memberships
            .find(&cmd.user.email, &club.id)
            .await?
            .is_some()
        {
            return Err(already_member());
        }

        let payment_id = cmd.payment_id.filter(|id| !id.trim().is_empty());
        if club.requires_payment() && payment_id.is_none() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Payment required for this club",
            ));
        }

        let membership = Membership::activate(cmd.user.email.clone(), club.id, payment_id);
        self.memberships
            .join(&membership)
            .await
            .map_err(|e| match e.code {
                ErrorCode::Conflict => already_member(),
                _ => e,
            })?;

        tracing::info!(club_id = %club.id, user = %cmd.user.email, "Joined club");
        Ok(membership)
    }
}

fn already_member() -> DomainError {
    DomainError::conflict("Already a member of this club")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{member, seed_club, store};
    use crate::domain::club::ClubStatus;
    use crate::domain::membership::MembershipStatus;

    fn command(club_id: ClubId, email: &str, payment_id: Option<&str>) -> JoinClubCommand {
        JoinClubCommand {
            user: member(email),
            club_id,
            payment_id: payment_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn free_club_join_succeeds_without_payment() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let handler = JoinClubHandler::new(store.clone(), store.clone());

        let membership = handler
            .handle(command(club.id, "a@example.com", None))
            .await
            .unwrap();

        assert_eq!(membership.status, MembershipStatus::Active);
        let stored = ClubRepository::find_by_id(store.as_ref(), &club.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.member_count, 1);
    }

    #[tokio::test]
    async fn paid_club_requires_payment_id() {
        let store = store();
        let club = seed_club(&store, 1500, ClubStatus::Approved).await;
        let handler = JoinClubHandler::new(store.clone(), store.clone());

        let err = handler
            .handle(command(club.id, "a@example.com", None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message(), "Payment required for this club");

        let membership = handler
            .handle(command(club.id, "a@example.com", Some("pay_123")))
            .await
            .unwrap();
        assert_eq!(membership.payment_id.as_deref(), Some("pay_123"));
    }

    #[tokio::test]
    async fn second_join_conflicts_and_count_stays() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;
        let handler = JoinClubHandler::new(store.clone(), store.clone());

        handler
            .handle(command(club.id, "a@example.com", None))
            .await
            .unwrap();
        let err = handler
            .handle(command(club.id, "a@example.com", None))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message(), "Already a member of this club");
        let stored = ClubRepository::find_by_id(store.as_ref(), &club.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.member_count, 1);
    }

    #[tokio::test]
    async fn pending_club_cannot_be_joined() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Pending).await;
        let handler = JoinClubHandler::new(store.clone(), store);

        let err = handler
            .handle(command(club.id, "a@example.com", None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message(), "Club not found or not approved");
    }

    #[tokio::test]
    async fn member_count_tracks_concurrent_joins() {
        let store = store();
        let club = seed_club(&store, 0, ClubStatus::Approved).await;

        let mut tasks = Vec::new();
        for i in 0..5 {
            let handler = JoinClubHandler::new(store.clone(), store.clone());
            let club_id = club.id;
            tasks.push(tokio::spawn(async move {
                handler
                    .handle(command(club_id, &format!("m{}@example.com", i), None))
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let stored = ClubRepository::find_by_id(store.as_ref(), &club.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.member_count, 5);
        assert_eq!(store.list_for_club(&club.id).await.unwrap().len(), 5);
    }
}
