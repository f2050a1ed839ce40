//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ClubId, DomainError, EventId, PaymentId, Timestamp};
use crate::domain::payment::{Payment, PaymentView};
use crate::ports::PaymentRepository;

use super::{conflict_or_db_error, db_error, money_column, parse_column};

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PAYMENT_COLUMNS: &str = "p.id, p.user_email, p.amount_cents, p.payment_type, p.club_id, \
     p.event_id, p.stripe_payment_intent_id, p.status, p.created_at, p.updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_email: String,
    amount_cents: i64,
    payment_type: String,
    club_id: Uuid,
    event_id: Option<Uuid>,
    stripe_payment_intent_id: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_email: row.user_email,
            amount: money_column("amount_cents", row.amount_cents)?,
            payment_type: parse_column("payment_type", &row.payment_type)?,
            club_id: ClubId::from_uuid(row.club_id),
            event_id: row.event_id.map(EventId::from_uuid),
            stripe_payment_intent_id: row.stripe_payment_intent_id,
            status: parse_column("status", &row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentViewRow {
    #[sqlx(flatten)]
    payment: PaymentRow,
    club_name: Option<String>,
    event_title: Option<String>,
}

impl TryFrom<PaymentViewRow> for PaymentView {
    type Error = DomainError;

    fn try_from(row: PaymentViewRow) -> Result<Self, Self::Error> {
        Ok(PaymentView {
            payment: Payment::try_from(row.payment)?,
            club_name: row.club_name,
            event_title: row.event_title,
        })
    }
}

fn view_select(where_clause: &str) -> String {
    format!(
        "SELECT {}, c.club_name AS club_name, e.title AS event_title \
         FROM payments p \
         LEFT JOIN clubs c ON c.id = p.club_id \
         LEFT JOIN events e ON e.id = p.event_id \
         WHERE {} ORDER BY p.created_at DESC",
        PAYMENT_COLUMNS, where_clause
    )
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_email, amount_cents, payment_type, club_id, event_id,
                stripe_payment_intent_id, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(&payment.user_email)
        .bind(payment.amount.cents())
        .bind(payment.payment_type.as_str())
        .bind(payment.club_id.as_uuid())
        .bind(payment.event_id.map(|id| *id.as_uuid()))
        .bind(&payment.stripe_payment_intent_id)
        .bind(payment.status.as_str())
        .bind(payment.created_at.as_datetime())
        .bind(payment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_or_db_error(
                e,
                &["payments_intent_key"],
                "Payment intent already recorded",
                "Failed to save payment",
            )
        })?;

        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE payments SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(payment.id.as_uuid())
            .bind(payment.status.as_str())
            .bind(payment.updated_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update payment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Payment"));
        }

        Ok(())
    }

    async fn find_by_intent_id(&self, intent_id: &str) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payments p WHERE p.stripe_payment_intent_id = $1",
            PAYMENT_COLUMNS
        ))
        .bind(intent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn list_for_user(&self, email: &str) -> Result<Vec<PaymentView>, DomainError> {
        let rows: Vec<PaymentViewRow> = sqlx::query_as(&view_select("p.user_email = $1"))
            .bind(email)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list payments", e))?;

        rows.into_iter().map(PaymentView::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<PaymentView>, DomainError> {
        let rows: Vec<PaymentViewRow> = sqlx::query_as(&view_select("TRUE"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list payments", e))?;

        rows.into_iter().map(PaymentView::try_from).collect()
    }
}
