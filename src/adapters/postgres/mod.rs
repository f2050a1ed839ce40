//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository`
//! - `PostgresClubRepository`
//! - `PostgresEventRepository` - Includes the locked register/unregister
//!   transactions
//! - `PostgresMembershipRepository` - Join insert plus counter increment
//! - `PostgresPaymentRepository`
//!
//! Schema lives in `migrations/` and is applied with `run_migrations`.

mod club_repository;
mod event_repository;
mod membership_repository;
mod payment_repository;
mod user_repository;

pub use club_repository::PostgresClubRepository;
pub use event_repository::PostgresEventRepository;
pub use membership_repository::PostgresMembershipRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use user_repository::PostgresUserRepository;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::club::{Club, ClubSummary};
use crate::domain::foundation::{ClubId, DomainError, ErrorCode, Money, Timestamp};

/// Applies all pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}

/// Wraps a sqlx error as a `DatabaseError` with context.
fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Maps a violation of `constraint` to `Conflict(message)`, anything else to
/// `DatabaseError`.
fn conflict_or_db_error(
    e: sqlx::Error,
    constraint: &[&str],
    message: &str,
    context: &str,
) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err
            .constraint()
            .is_some_and(|name| constraint.contains(&name))
        {
            return DomainError::conflict(message);
        }
    }
    db_error(context, e)
}

/// Converts a stored string into a domain enum, reporting corrupt values as
/// `DatabaseError`.
fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
{
    value.parse::<T>().map_err(|_| {
        DomainError::database(format!("Invalid {} value in database: {}", column, value))
    })
}

fn money_column(column: &str, cents: i64) -> Result<Money, DomainError> {
    Money::from_cents(cents)
        .map_err(|_| DomainError::database(format!("Negative {} in database", column)))
}

fn count_column(column: &str, value: i64) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::database(format!("{} out of range: {}", column, value)))
}

/// `%term%` for ILIKE with `\` escaping the pattern metacharacters.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Column list matching `ClubRow`, for a table aliased `c`.
const CLUB_COLUMNS: &str = "c.id, c.club_name, c.description, c.category, c.location, \
     c.banner_image, c.membership_fee_cents, c.status, c.manager_email, c.member_count, \
     c.created_at, c.updated_at";

/// Database row representation of a club.
#[derive(Debug, sqlx::FromRow)]
struct ClubRow {
    id: Uuid,
    club_name: String,
    description: String,
    category: String,
    location: String,
    banner_image: String,
    membership_fee_cents: i64,
    status: String,
    manager_email: String,
    member_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClubRow> for Club {
    type Error = DomainError;

    fn try_from(row: ClubRow) -> Result<Self, Self::Error> {
        Ok(Club {
            id: ClubId::from_uuid(row.id),
            club_name: row.club_name,
            description: row.description,
            category: parse_column("category", &row.category)?,
            location: row.location,
            banner_image: row.banner_image,
            membership_fee: money_column("membership_fee_cents", row.membership_fee_cents)?,
            status: parse_column("status", &row.status)?,
            manager_email: row.manager_email,
            member_count: count_column("member_count", row.member_count)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Club summary columns joined onto other rows, prefixed `club_`.
const CLUB_SUMMARY_COLUMNS: &str = "c.id AS club_id, c.club_name AS club_name, \
     c.location AS club_location, c.category AS club_category, \
     c.banner_image AS club_banner_image, c.membership_fee_cents AS club_membership_fee_cents, \
     c.manager_email AS club_manager_email";

#[derive(Debug, sqlx::FromRow)]
struct ClubSummaryRow {
    club_id: Uuid,
    club_name: String,
    club_location: String,
    club_category: String,
    club_banner_image: String,
    club_membership_fee_cents: i64,
    club_manager_email: String,
}

impl TryFrom<ClubSummaryRow> for ClubSummary {
    type Error = DomainError;

    fn try_from(row: ClubSummaryRow) -> Result<Self, Self::Error> {
        Ok(ClubSummary {
            id: ClubId::from_uuid(row.club_id),
            club_name: row.club_name,
            location: row.club_location,
            category: parse_column("category", &row.club_category)?,
            banner_image: row.club_banner_image,
            membership_fee: money_column("membership_fee_cents", row.club_membership_fee_cents)?,
            manager_email: row.club_manager_email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("photo"), "%photo%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
    }

    #[test]
    fn parse_column_reports_database_error() {
        let err = parse_column::<crate::domain::club::ClubStatus>("status", "archived").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn count_column_rejects_negative() {
        assert!(count_column("member_count", -1).is_err());
        assert_eq!(count_column("member_count", 3).unwrap(), 3);
    }
}
