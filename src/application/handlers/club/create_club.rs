//! CreateClubHandler - Command handler for club creation by a manager.

use std::sync::Arc;

use crate::domain::club::{Club, NewClub};
use crate::domain::foundation::{require_role, AuthenticatedUser, DomainError, Role};
use crate::ports::ClubRepository;

#[derive(Debug, Clone)]
pub struct CreateClubCommand {
    pub user: AuthenticatedUser,
    pub fields: NewClub,
}

pub struct CreateClubHandler {
    clubs: Arc<dyn ClubRepository>,
}

impl CreateClubHandler {
    pub fn new(clubs: Arc<dyn ClubRepository>) -> Self {
        Self { clubs }
    }

    /// Creates a `pending` club owned by the caller.
    pub async fn handle(&self, cmd: CreateClubCommand) -> Result<Club, DomainError> {
        require_role(&cmd.user, &[Role::ClubManager])?;

        let club = Club::create(cmd.fields, cmd.user.email.clone())?;
        self.clubs.create(&club).await?;

        tracing::info!(club_id = %club.id, manager = %club.manager_email, "Club created");
        Ok(club)
    }
}
