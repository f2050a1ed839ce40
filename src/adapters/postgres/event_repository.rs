//! PostgreSQL implementation of EventRepository.
//!
//! Registration and unregistration lock the event row (`FOR UPDATE`) for the
//! length of their transaction. Concurrent registrations for the same event
//! therefore run one after another: the capacity check, the insert and the
//! attendee recount see a consistent count. The unique constraint on
//! (event_id, user_email) still backs the duplicate check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::club::ClubSummary;
use crate::domain::event::{Event, EventQuery, EventRegistration, EventWithClub};
use crate::domain::foundation::{
    ClubId, DomainError, EventId, Page, RegistrationId, Timestamp,
};
use crate::ports::EventRepository;

use super::{
    conflict_or_db_error, count_column, db_error, like_pattern, money_column, parse_column,
    ClubSummaryRow, CLUB_SUMMARY_COLUMNS,
};

pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const EVENT_COLUMNS: &str = "e.id, e.club_id, e.title, e.description, e.event_date, \
     e.location, e.is_paid, e.event_fee_cents, e.max_attendees, e.current_attendees, \
     e.created_at, e.updated_at";

/// Events of approved clubs whose title matches `$1` (NULL for any).
const PUBLIC_FILTER: &str = "c.status = 'approved' \
     AND ($1::text IS NULL OR e.title ILIKE $1 ESCAPE '\\')";

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    club_id: Uuid,
    title: String,
    description: String,
    event_date: DateTime<Utc>,
    location: String,
    is_paid: bool,
    event_fee_cents: i64,
    max_attendees: Option<i64>,
    current_attendees: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId::from_uuid(row.id),
            club_id: ClubId::from_uuid(row.club_id),
            title: row.title,
            description: row.description,
            event_date: Timestamp::from_datetime(row.event_date),
            location: row.location,
            is_paid: row.is_paid,
            event_fee: money_column("event_fee_cents", row.event_fee_cents)?,
            max_attendees: row
                .max_attendees
                .map(|max| count_column("max_attendees", max))
                .transpose()?,
            current_attendees: count_column("current_attendees", row.current_attendees)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventWithClubRow {
    #[sqlx(flatten)]
    event: EventRow,
    #[sqlx(flatten)]
    club: ClubSummaryRow,
}

impl TryFrom<EventWithClubRow> for EventWithClub {
    type Error = DomainError;

    fn try_from(row: EventWithClubRow) -> Result<Self, Self::Error> {
        Ok(EventWithClub {
            event: Event::try_from(row.event)?,
            club: ClubSummary::try_from(row.club)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: Uuid,
    event_id: Uuid,
    user_email: String,
    club_id: Uuid,
    status: String,
    payment_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for EventRegistration {
    type Error = DomainError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        Ok(EventRegistration {
            id: RegistrationId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            user_email: row.user_email,
            club_id: ClubId::from_uuid(row.club_id),
            status: parse_column("status", &row.status)?,
            payment_id: row.payment_id,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn joined_select(where_clause: &str) -> String {
    format!(
        "SELECT {}, {} FROM events e JOIN clubs c ON c.id = e.club_id WHERE {}",
        EVENT_COLUMNS, CLUB_SUMMARY_COLUMNS, where_clause
    )
}

async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>, DomainError> {
    pool.begin()
        .await
        .map_err(|e| db_error("Failed to begin transaction", e))
}

async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), DomainError> {
    tx.commit()
        .await
        .map_err(|e| db_error("Failed to commit transaction", e))
}

/// Stores a fresh count of `registered` rows on the event and returns it.
async fn recount(
    tx: &mut Transaction<'static, Postgres>,
    event_id: &EventId,
) -> Result<u32, DomainError> {
    let count: i64 = sqlx::query_scalar(
        r#"
        UPDATE events SET current_attendees = (
            SELECT COUNT(*) FROM event_registrations
            WHERE event_id = $1 AND status = 'registered'
        )
        WHERE id = $1
        RETURNING current_attendees
        "#,
    )
    .bind(event_id.as_uuid())
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| db_error("Failed to recount attendees", e))?;

    count_column("current_attendees", count)
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create(&self, event: &Event) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, club_id, title, description, event_date, location, is_paid,
                event_fee_cents, max_attendees, current_attendees, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.club_id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date.as_datetime())
        .bind(&event.location)
        .bind(event.is_paid)
        .bind(event.event_fee.cents())
        .bind(event.max_attendees.map(i64::from))
        .bind(i64::from(event.current_attendees))
        .bind(event.created_at.as_datetime())
        .bind(event.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save event", e))?;

        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE events SET
                title = $2,
                description = $3,
                event_date = $4,
                location = $5,
                is_paid = $6,
                event_fee_cents = $7,
                max_attendees = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_date.as_datetime())
        .bind(&event.location)
        .bind(event.is_paid)
        .bind(event.event_fee.cents())
        .bind(event.max_attendees.map(i64::from))
        .bind(event.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update event", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Event"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {} FROM events e WHERE e.id = $1", EVENT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find event", e))?;

        row.map(Event::try_from).transpose()
    }

    async fn find_with_club(&self, id: &EventId) -> Result<Option<EventWithClub>, DomainError> {
        let row: Option<EventWithClubRow> = sqlx::query_as(&joined_select("e.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find event", e))?;

        row.map(EventWithClub::try_from).transpose()
    }

    async fn list_public(&self, query: &EventQuery) -> Result<Page<EventWithClub>, DomainError> {
        let pattern = query.search.as_deref().map(like_pattern);

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM events e JOIN clubs c ON c.id = e.club_id WHERE {}",
            PUBLIC_FILTER
        ))
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count events", e))?;

        // Sort column comes from a closed enum, never from raw input.
        let sql = format!(
            "{} ORDER BY e.{} {}, e.id LIMIT $2 OFFSET $3",
            joined_select(PUBLIC_FILTER),
            query.sort.as_column(),
            query.order.as_sql()
        );
        let rows: Vec<EventWithClubRow> = sqlx::query_as(&sql)
            .bind(&pattern)
            .bind(i64::from(query.page.limit()))
            .bind(query.page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list events", e))?;

        let events = rows
            .into_iter()
            .map(EventWithClub::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(events, total.max(0) as u64, query.page))
    }

    async fn list_upcoming(
        &self,
        now: Timestamp,
        limit: usize,
    ) -> Result<Vec<EventWithClub>, DomainError> {
        let sql = format!(
            "{} ORDER BY e.event_date ASC LIMIT $2",
            joined_select("c.status = 'approved' AND e.event_date >= $1")
        );
        let rows: Vec<EventWithClubRow> = sqlx::query_as(&sql)
            .bind(now.as_datetime())
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list upcoming events", e))?;

        rows.into_iter().map(EventWithClub::try_from).collect()
    }

    async fn list_by_manager(&self, email: &str) -> Result<Vec<EventWithClub>, DomainError> {
        let sql = format!(
            "{} ORDER BY e.event_date DESC",
            joined_select("c.manager_email = $1")
        );
        let rows: Vec<EventWithClubRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list manager events", e))?;

        rows.into_iter().map(EventWithClub::try_from).collect()
    }

    async fn delete(&self, id: &EventId) -> Result<bool, DomainError> {
        let mut tx = begin(&self.pool).await?;

        sqlx::query("DELETE FROM event_registrations WHERE event_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete registrations", e))?;

        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete event", e))?;

        commit(tx).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn register(&self, registration: &EventRegistration) -> Result<u32, DomainError> {
        let mut tx = begin(&self.pool).await?;

        let locked: Option<Option<i64>> =
            sqlx::query_scalar("SELECT max_attendees FROM events WHERE id = $1 FOR UPDATE")
                .bind(registration.event_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to lock event", e))?;
        let max_attendees = locked.ok_or_else(|| DomainError::not_found("Event"))?;

        if let Some(max) = max_attendees {
            let registered: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM event_registrations \
                 WHERE event_id = $1 AND status = 'registered'",
            )
            .bind(registration.event_id.as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to count registrations", e))?;

            if registered >= max {
                return Err(DomainError::capacity("Event is full"));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO event_registrations (
                id, event_id, user_email, club_id, status, payment_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(registration.event_id.as_uuid())
        .bind(&registration.user_email)
        .bind(registration.club_id.as_uuid())
        .bind(registration.status.as_str())
        .bind(&registration.payment_id)
        .bind(registration.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            conflict_or_db_error(
                e,
                &["event_registrations_event_user_key"],
                "You are already registered for this event",
                "Failed to save registration",
            )
        })?;

        let count = recount(&mut tx, &registration.event_id).await?;
        commit(tx).await?;
        Ok(count)
    }

    async fn unregister(
        &self,
        event_id: &EventId,
        email: &str,
    ) -> Result<Option<u32>, DomainError> {
        let mut tx = begin(&self.pool).await?;

        sqlx::query("SELECT id FROM events WHERE id = $1 FOR UPDATE")
            .bind(event_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to lock event", e))?;

        let deleted = sqlx::query(
            "DELETE FROM event_registrations WHERE event_id = $1 AND user_email = $2",
        )
        .bind(event_id.as_uuid())
        .bind(email)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to delete registration", e))?;

        if deleted.rows_affected() == 0 {
            // Nothing changed; dropping the transaction rolls it back.
            return Ok(None);
        }

        let count = recount(&mut tx, event_id).await?;
        commit(tx).await?;
        Ok(Some(count))
    }

    async fn find_registration(
        &self,
        event_id: &EventId,
        email: &str,
    ) -> Result<Option<EventRegistration>, DomainError> {
        let row: Option<RegistrationRow> = sqlx::query_as(
            r#"
            SELECT id, event_id, user_email, club_id, status, payment_id, created_at
            FROM event_registrations
            WHERE event_id = $1 AND user_email = $2
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find registration", e))?;

        row.map(EventRegistration::try_from).transpose()
    }

    async fn count_registered(&self, event_id: &EventId) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM event_registrations \
             WHERE event_id = $1 AND status = 'registered'",
        )
        .bind(event_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count registrations", e))?;

        count_column("registered", count)
    }
}
