//! User repository - the credential store.
//!
//! Backs the auth core: identity lookup by login key or by stored refresh
//! token, plus the single read-modify-write `save` used by login, refresh,
//! and logout. Email uniqueness is enforced at the storage layer by a
//! UNIQUE index and surfaces as `DbError::UniqueViolation`.

use crate::{DbError, Result as DbErrorResult};

use tm_core::{ErrorLocation, User};

use std::panic::Location;

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new identity and return it with the store-assigned id.
    pub async fn create(&self, user: &User) -> DbErrorResult<User> {
        let created_at = user.created_at.timestamp();
        let updated_at = user.updated_at.timestamp();
        let refresh_token_expires_at = user.refresh_token_expires_at.map(|dt| dt.timestamp());

        let result = sqlx::query(
            r#"
                INSERT INTO users (
                    user_name, email, password_hash, password_salt,
                    refresh_token, refresh_token_expires_at,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.user_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(user.refresh_token.as_deref())
        .bind(refresh_token_expires_at)
        .bind(created_at)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_sqlx_unique(e, "email"))?;

        let mut created = user.clone();
        created.id = result.last_insert_rowid();
        Ok(created)
    }

    /// Look up by the login key. Exact, case-sensitive match.
    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, user_name, email, password_hash, password_salt,
                    refresh_token, refresh_token_expires_at, created_at, updated_at
                FROM users
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user_row(&r)).transpose()
    }

    /// Look up the identity holding exactly this refresh token, if any.
    pub async fn find_by_refresh_token(&self, token: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, user_name, email, password_hash, password_salt,
                    refresh_token, refresh_token_expires_at, created_at, updated_at
                FROM users
                WHERE refresh_token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user_row(&r)).transpose()
    }

    pub async fn find_by_id(&self, id: i64) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, user_name, email, password_hash, password_salt,
                    refresh_token, refresh_token_expires_at, created_at, updated_at
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user_row(&r)).transpose()
    }

    /// Persist the mutable fields of an existing identity.
    ///
    /// The whole record is written in one statement so a login/refresh/logout
    /// mutation is atomic per identity row.
    pub async fn save(&self, user: &User) -> DbErrorResult<()> {
        let updated_at = user.updated_at.timestamp();
        let refresh_token_expires_at = user.refresh_token_expires_at.map(|dt| dt.timestamp());

        sqlx::query(
            r#"
                UPDATE users
                SET user_name = ?, email = ?, password_hash = ?, password_salt = ?,
                    refresh_token = ?, refresh_token_expires_at = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(&user.user_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .bind(user.refresh_token.as_deref())
        .bind(refresh_token_expires_at)
        .bind(updated_at)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from_sqlx_unique(e, "email"))?;

        Ok(())
    }
}

#[track_caller]
fn map_user_row(row: &SqliteRow) -> DbErrorResult<User> {
    let created_at_ts: i64 = row.try_get("created_at")?;
    let updated_at_ts: i64 = row.try_get("updated_at")?;
    let expires_at_ts: Option<i64> = row.try_get("refresh_token_expires_at")?;

    Ok(User {
        id: row.try_get("id")?,
        user_name: row.try_get("user_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        password_salt: row.try_get("password_salt")?,
        refresh_token: row.try_get("refresh_token")?,
        refresh_token_expires_at: expires_at_ts
            .map(|ts| {
                DateTime::from_timestamp(ts, 0).ok_or_else(|| DbError::Initialization {
                    message: "Invalid timestamp in users.refresh_token_expires_at".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            })
            .transpose()?,
        created_at: DateTime::from_timestamp(created_at_ts, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in users.created_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        updated_at: DateTime::from_timestamp(updated_at_ts, 0).ok_or_else(|| {
            DbError::Initialization {
                message: "Invalid timestamp in users.updated_at".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
    })
}
