/// Login session model
///
/// A row per logged-in browser. The primary key is the SHA-256 of the cookie
/// token (see [`crate::auth::token`]), so lookups hash the presented token
/// and never compare plaintext.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     token_hash CHAR(64) PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::auth::token::{generate_session_token, hash_session_token};
use crate::models::user::User;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub token_hash: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session for `user_id` lasting `ttl`
    ///
    /// Returns the stored row and the plaintext token. The token is not
    /// recoverable afterwards.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        ttl: Duration,
    ) -> Result<(Self, String), sqlx::Error> {
        let (token, token_hash) = generate_session_token();

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token_hash, user_id, created_at, expires_at
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(Utc::now() + ttl)
        .fetch_one(pool)
        .await?;

        Ok((session, token))
    }

    /// Resolves a plaintext token to its user, ignoring expired sessions
    pub async fn find_user(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.created_at, u.last_login_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(hash_session_token(token))
        .fetch_optional(pool)
        .await
    }

    /// Deletes the session behind a plaintext token
    ///
    /// Returns false if there was no such session.
    pub async fn delete(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(hash_session_token(token))
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes a user's expired sessions, returning how many were dropped
    pub async fn delete_expired_for_user(pool: &PgPool, user_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= NOW()")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
