use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewUser, User};

use super::is_unique_violation;

#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new account. Returns `None` when the email is already taken,
    /// whether found by an earlier check or detected by the unique index at
    /// insert time.
    pub async fn create(&self, new_user: NewUser) -> Result<Option<User>, sqlx::Error> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, name, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, email, password_hash, name, role, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .bind(new_user.role)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(Some(user)),
            Err(err) if is_unique_violation(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Lookup by email, case-insensitively. Callers normalize to lowercase,
    /// but the comparison tolerates stored variants regardless.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name, role, created_at, updated_at
             FROM users
             WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name, role, created_at, updated_at
             FROM users
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
