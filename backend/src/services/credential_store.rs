//! Parameterized reads and writes against the `users` and `tokens` tables.

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AccountRow, IssuanceContext, SessionTokenRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Uniqueness constraint violated")]
    UniquenessViolation,
    #[error("Database error: {0}")]
    Unavailable(#[from] sqlx::Error),
}

pub async fn find_account_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<AccountRow>, sqlx::Error> {
    sqlx::query_as("SELECT id, email, username, created_at FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_password_hash(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT password_hash FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Insert a new account. A second insert for the same email fails with
/// `UniquenessViolation` rather than a generic database error.
pub async fn insert_account(
    pool: &SqlitePool,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<AccountRow, StoreError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, username, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            StoreError::UniquenessViolation
        }
        other => StoreError::Unavailable(other),
    })?;

    Ok(AccountRow {
        id: id.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        created_at: now,
    })
}

pub async fn insert_session_record(
    pool: &SqlitePool,
    email: &str,
    refresh_token: &str,
    context: IssuanceContext,
) -> Result<SessionTokenRow, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO tokens (id, email, refresh_token, issued_via, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(email)
    .bind(refresh_token)
    .bind(context.as_str())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(SessionTokenRow {
        id: id.to_string(),
        email: email.to_string(),
        refresh_token: refresh_token.to_string(),
        issued_via: context.as_str().to_string(),
        created_at: now,
    })
}

pub async fn find_session_record(
    pool: &SqlitePool,
    refresh_token: &str,
) -> Result<Option<SessionTokenRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tokens WHERE refresh_token = ?")
        .bind(refresh_token)
        .fetch_optional(pool)
        .await
}
