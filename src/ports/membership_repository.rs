//! Membership repository port.
//!
//! # Design
//!
//! - **Unique constraint**: one membership per (user email, club), enforced
//!   by the store and reported as `Conflict`
//! - **Counter**: joining increments `clubs.member_count` in the same
//!   transaction as the insert

use async_trait::async_trait;

use crate::domain::foundation::{ClubId, DomainError};
use crate::domain::membership::{Membership, MembershipWithClub};

/// Persistence for memberships.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert the membership and increment the club's member count by one,
    /// atomically.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the user is already a member of the club
    /// - `NotFound` if the club no longer exists
    async fn join(&self, membership: &Membership) -> Result<(), DomainError>;

    async fn find(&self, email: &str, club_id: &ClubId) -> Result<Option<Membership>, DomainError>;

    /// The user's memberships with club details, newest first.
    async fn list_for_user(&self, email: &str) -> Result<Vec<MembershipWithClub>, DomainError>;

    /// All memberships of a club, newest first.
    async fn list_for_club(&self, club_id: &ClubId) -> Result<Vec<Membership>, DomainError>;
}
