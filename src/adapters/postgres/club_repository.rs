//! PostgreSQL implementation of ClubRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::club::{Club, ClubQuery, ClubStatus};
use crate::domain::foundation::{ClubId, DomainError, Page, Timestamp};
use crate::ports::ClubRepository;

use super::{db_error, like_pattern, ClubRow, CLUB_COLUMNS};

pub struct PostgresClubRepository {
    pool: PgPool,
}

impl PostgresClubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Filter shared by the approved listing and its count. `$1` is the name
/// pattern, `$2` the category; both may be NULL.
const APPROVED_FILTER: &str = "c.status = 'approved' \
     AND ($1::text IS NULL OR c.club_name ILIKE $1 ESCAPE '\\') \
     AND ($2::text IS NULL OR c.category = $2)";

#[async_trait]
impl ClubRepository for PostgresClubRepository {
    async fn create(&self, club: &Club) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO clubs (
                id, club_name, description, category, location, banner_image,
                membership_fee_cents, status, manager_email, member_count, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(club.id.as_uuid())
        .bind(&club.club_name)
        .bind(&club.description)
        .bind(club.category.as_str())
        .bind(&club.location)
        .bind(&club.banner_image)
        .bind(club.membership_fee.cents())
        .bind(club.status.as_str())
        .bind(&club.manager_email)
        .bind(i64::from(club.member_count))
        .bind(club.created_at.as_datetime())
        .bind(club.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save club", e))?;

        Ok(())
    }

    async fn update(&self, club: &Club) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE clubs SET
                club_name = $2,
                description = $3,
                category = $4,
                location = $5,
                banner_image = $6,
                membership_fee_cents = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(club.id.as_uuid())
        .bind(&club.club_name)
        .bind(&club.description)
        .bind(club.category.as_str())
        .bind(&club.location)
        .bind(&club.banner_image)
        .bind(club.membership_fee.cents())
        .bind(club.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update club", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Club"));
        }

        Ok(())
    }

    async fn update_status(
        &self,
        id: &ClubId,
        status: ClubStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE clubs SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status.as_str())
            .bind(updated_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update club status", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Club"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ClubId) -> Result<Option<Club>, DomainError> {
        let row: Option<ClubRow> =
            sqlx::query_as(&format!("SELECT {} FROM clubs c WHERE c.id = $1", CLUB_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find club", e))?;

        row.map(Club::try_from).transpose()
    }

    async fn list_approved(&self, query: &ClubQuery) -> Result<Page<Club>, DomainError> {
        let pattern = query.search.as_deref().map(like_pattern);
        let category = query.category.map(|c| c.as_str());

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM clubs c WHERE {}",
            APPROVED_FILTER
        ))
        .bind(&pattern)
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count clubs", e))?;

        // Sort column comes from a closed enum, never from raw input.
        let sql = format!(
            "SELECT {} FROM clubs c WHERE {} ORDER BY c.{} {}, c.id LIMIT $3 OFFSET $4",
            CLUB_COLUMNS,
            APPROVED_FILTER,
            query.sort.as_column(),
            query.order.as_sql()
        );
        let rows: Vec<ClubRow> = sqlx::query_as(&sql)
            .bind(&pattern)
            .bind(category)
            .bind(i64::from(query.page.limit()))
            .bind(query.page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list clubs", e))?;

        let clubs = rows
            .into_iter()
            .map(Club::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(clubs, total.max(0) as u64, query.page))
    }

    async fn list_featured(&self, limit: usize) -> Result<Vec<Club>, DomainError> {
        let rows: Vec<ClubRow> = sqlx::query_as(&format!(
            "SELECT {} FROM clubs c WHERE c.status = 'approved' \
             ORDER BY c.member_count DESC, c.created_at DESC LIMIT $1",
            CLUB_COLUMNS
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list featured clubs", e))?;

        rows.into_iter().map(Club::try_from).collect()
    }

    async fn list_by_manager(&self, email: &str) -> Result<Vec<Club>, DomainError> {
        let rows: Vec<ClubRow> = sqlx::query_as(&format!(
            "SELECT {} FROM clubs c WHERE c.manager_email = $1 ORDER BY c.created_at DESC",
            CLUB_COLUMNS
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list manager clubs", e))?;

        rows.into_iter().map(Club::try_from).collect()
    }

    async fn list_all(&self, status: Option<ClubStatus>) -> Result<Vec<Club>, DomainError> {
        let rows: Vec<ClubRow> = sqlx::query_as(&format!(
            "SELECT {} FROM clubs c WHERE ($1::text IS NULL OR c.status = $1) \
             ORDER BY c.created_at DESC",
            CLUB_COLUMNS
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list clubs", e))?;

        rows.into_iter().map(Club::try_from).collect()
    }
}
