//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, Role, Timestamp, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

use super::{conflict_or_db_error, db_error, parse_column};

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    external_uid: String,
    name: String,
    email: String,
    photo_url: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_uuid(row.id),
            external_uid: row.external_uid,
            name: row.name,
            email: row.email,
            photo_url: row.photo_url,
            role: parse_column::<Role>("role", &row.role)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const USER_COLUMNS: &str = "id, external_uid, name, email, photo_url, role, created_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, external_uid, name, email, photo_url, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.external_uid)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.photo_url)
        .bind(user.role.as_str())
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_or_db_error(
                e,
                &["users_email_key", "users_external_uid_key"],
                "User already exists",
                "Failed to save user",
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_external_uid(&self, uid: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE external_uid = $1",
            USER_COLUMNS
        ))
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list users", e))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_role(&self, id: &UserId, role: Role) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET role = $2 WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update user role", e))?;

        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
