//! Club repository port.

use async_trait::async_trait;

use crate::domain::club::{Club, ClubQuery, ClubStatus};
use crate::domain::foundation::{ClubId, DomainError, Page, Timestamp};

/// Persistence for clubs.
#[async_trait]
pub trait ClubRepository: Send + Sync {
    async fn create(&self, club: &Club) -> Result<(), DomainError>;

    /// Persist the manager-editable fields and `updated_at`.
    ///
    /// `status` and `member_count` are never written here; they belong to
    /// `update_status` and the membership join transaction respectively.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the club no longer exists
    async fn update(&self, club: &Club) -> Result<(), DomainError>;

    /// Persist a review decision. Only `status` and `updated_at` change.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the club no longer exists
    async fn update_status(
        &self,
        id: &ClubId,
        status: ClubStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ClubId) -> Result<Option<Club>, DomainError>;

    /// Approved clubs matching `query`, one page at a time.
    async fn list_approved(&self, query: &ClubQuery) -> Result<Page<Club>, DomainError>;

    /// Approved clubs by member count desc, then newest first.
    async fn list_featured(&self, limit: usize) -> Result<Vec<Club>, DomainError>;

    /// Every club managed by `email`, regardless of status.
    async fn list_by_manager(&self, email: &str) -> Result<Vec<Club>, DomainError>;

    /// Every club, optionally filtered by status, newest first.
    async fn list_all(&self, status: Option<ClubStatus>) -> Result<Vec<Club>, DomainError>;
}
