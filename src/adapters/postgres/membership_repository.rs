//! PostgreSQL implementation of MembershipRepository.
//!
//! Joining inserts the membership and bumps `clubs.member_count` in one
//! transaction with an in-place `member_count + 1`, so concurrent joins never
//! lose an increment.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::club::ClubSummary;
use crate::domain::foundation::{ClubId, DomainError, MembershipId, Timestamp};
use crate::domain::membership::{Membership, MembershipWithClub};
use crate::ports::MembershipRepository;

use super::{conflict_or_db_error, db_error, parse_column, ClubSummaryRow, CLUB_SUMMARY_COLUMNS};

pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MEMBERSHIP_COLUMNS: &str =
    "m.id, m.user_email, m.club_id, m.status, m.payment_id, m.expires_at, m.created_at";

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    user_email: String,
    club_id: Uuid,
    status: String,
    payment_id: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            user_email: row.user_email,
            club_id: ClubId::from_uuid(row.club_id),
            status: parse_column("status", &row.status)?,
            payment_id: row.payment_id,
            expires_at: row.expires_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipWithClubRow {
    #[sqlx(flatten)]
    membership: MembershipRow,
    #[sqlx(flatten)]
    club: ClubSummaryRow,
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn join(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, user_email, club_id, status, payment_id, expires_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(&membership.user_email)
        .bind(membership.club_id.as_uuid())
        .bind(membership.status.as_str())
        .bind(&membership.payment_id)
        .bind(membership.expires_at.as_ref().map(Timestamp::as_datetime))
        .bind(membership.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            conflict_or_db_error(
                e,
                &["memberships_user_club_key"],
                "Already a member of this club",
                "Failed to save membership",
            )
        })?;

        let result = sqlx::query(
            "UPDATE clubs SET member_count = member_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(membership.club_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to increment member count", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Club"));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn find(&self, email: &str, club_id: &ClubId) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships m WHERE m.user_email = $1 AND m.club_id = $2",
            MEMBERSHIP_COLUMNS
        ))
        .bind(email)
        .bind(club_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find membership", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn list_for_user(&self, email: &str) -> Result<Vec<MembershipWithClub>, DomainError> {
        let rows: Vec<MembershipWithClubRow> = sqlx::query_as(&format!(
            "SELECT {}, {} FROM memberships m JOIN clubs c ON c.id = m.club_id \
             WHERE m.user_email = $1 ORDER BY m.created_at DESC",
            MEMBERSHIP_COLUMNS, CLUB_SUMMARY_COLUMNS
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list memberships", e))?;

        rows.into_iter()
            .map(|row| {
                Ok(MembershipWithClub {
                    membership: Membership::try_from(row.membership)?,
                    club: ClubSummary::try_from(row.club)?,
                })
            })
            .collect()
    }

    async fn list_for_club(&self, club_id: &ClubId) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships m WHERE m.club_id = $1 ORDER BY m.created_at DESC",
            MEMBERSHIP_COLUMNS
        ))
        .bind(club_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list club members", e))?;

        rows.into_iter().map(Membership::try_from).collect()
    }
}
