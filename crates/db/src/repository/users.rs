//! User CRUD operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{UserPatch, UserRow};
use crate::DbError;

const USER_COLUMNS: &str =
    "user_id, phone_number, email, password, provider, role, fcm_token, created_at";

/// Insert a new user.
///
/// `password` is the bcrypt hash (or `None` for phone-only accounts).
/// A unique-constraint violation on email or phone is surfaced as
/// [`DbError::Conflict`].
pub async fn create_user(
    pool: &SqlitePool,
    email: Option<&str>,
    phone_number: Option<&str>,
    password: Option<&str>,
    role: &str,
    provider: &str,
) -> Result<UserRow, DbError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (user_id, phone_number, email, password, provider, role, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(phone_number)
    .bind(email)
    .bind(password)
    .bind(provider)
    .bind(role)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
            DbError::Conflict("email or phone number already in use")
        } else {
            DbError::Sqlx(e)
        }
    })?;

    get_user(pool, id).await
}

/// Fetch a single user by its primary key.
pub async fn get_user(pool: &SqlitePool, id: Uuid) -> Result<UserRow, DbError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?");
    sqlx::query_as::<_, UserRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Look up a user by email.  Returns `None` when no such user exists.
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRow>, DbError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Look up a user by phone number.  Returns `None` when no such user exists.
pub async fn find_by_phone(pool: &SqlitePool, phone: &str) -> Result<Option<UserRow>, DbError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE phone_number = ?");
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Return all users ordered by creation time (newest first).
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<UserRow>, DbError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, UserRow>(&query).fetch_all(pool).await?;
    Ok(rows)
}

/// Apply a partial update to a user.  `None` fields keep their current value.
///
/// Returns `DbError::NotFound` if the user does not exist.
pub async fn update_user(
    pool: &SqlitePool,
    id: Uuid,
    patch: &UserPatch,
) -> Result<UserRow, DbError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET phone_number = COALESCE(?, phone_number),
            email        = COALESCE(?, email),
            fcm_token    = COALESCE(?, fcm_token),
            role         = COALESCE(?, role)
        WHERE user_id = ?
        "#,
    )
    .bind(patch.phone_number.as_deref())
    .bind(patch.email.as_deref())
    .bind(patch.fcm_token.as_deref())
    .bind(patch.role.as_deref())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    get_user(pool, id).await
}

/// Replace a user's password hash.
pub async fn update_password(pool: &SqlitePool, id: Uuid, password: &str) -> Result<(), DbError> {
    let result = sqlx::query("UPDATE users SET password = ? WHERE user_id = ?")
        .bind(password)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

/// Permanently delete a user by its primary key.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
