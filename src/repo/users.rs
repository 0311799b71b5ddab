use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

/// Credential row used by the login flow. Never serialized.
#[derive(Debug, FromRow)]
pub struct Credentials {
    pub id: Uuid,
    pub password_hash: String,
}

/// Inserts a new user with a server-generated id.
///
/// A duplicate username (or the vanishingly unlikely id collision) trips the
/// unique constraint and surfaces as `AppError::Conflict`.
pub async fn insert(pool: &PgPool, username: &str, password_hash: &str) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3)
         RETURNING id, username",
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_credentials(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Credentials>, AppError> {
    let credentials = sqlx::query_as::<_, Credentials>(
        "SELECT id, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(credentials)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>("SELECT id, username FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(users)
}

/// Full replace of a user row with optimistic concurrency.
///
/// The row's version is read first; the write only lands if no other writer
/// bumped it in between. A lost race yields `ConcurrencyConflict` and the
/// caller is expected to re-fetch and retry.
pub async fn replace(
    pool: &PgPool,
    id: Uuid,
    username: &str,
    password_hash: &str,
) -> Result<(), AppError> {
    let version = sqlx::query_scalar::<_, i64>("SELECT version FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(version) = version else {
        return Err(AppError::NotFound("User not found".into()));
    };

    let result = sqlx::query(
        "UPDATE users SET username = $1, password_hash = $2, version = version + 1
         WHERE id = $3 AND version = $4",
    )
    .bind(username)
    .bind(password_hash)
    .bind(id)
    .bind(version)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        // Zero rows: either the row was modified after our read, or it vanished.
        let still_exists =
            sqlx::query_scalar::<_, i64>("SELECT version FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        return match still_exists {
            Some(_) => Err(AppError::ConcurrencyConflict(
                "User was modified concurrently".into(),
            )),
            None => Err(AppError::NotFound("User not found".into())),
        };
    }

    Ok(())
}

/// Deletes a user row. Owned tasks are removed by the FK cascade.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
