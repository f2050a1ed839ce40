//! Ownership of events through their hosting club.

use crate::domain::foundation::{AuthenticatedUser, ClubId, DomainError, OwnedByEmail};
use crate::ports::ClubRepository;

/// Fails with `Forbidden` unless the caller manages the club. A missing club
/// is reported the same way so that club ids cannot be probed.
pub(super) async fn require_club_owner(
    clubs: &dyn ClubRepository,
    club_id: &ClubId,
    user: &AuthenticatedUser,
    message: &str,
) -> Result<(), DomainError> {
    match clubs.find_by_id(club_id).await? {
        Some(club) => club.check_ownership(user, message),
        None => {
            tracing::warn!(club_id = %club_id, requested_by = %user.email, "Event club missing");
            Err(DomainError::forbidden(message))
        }
    }
}
