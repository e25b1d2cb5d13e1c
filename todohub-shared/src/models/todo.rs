/// Todo items
///
/// Owner-scoped: every todo belongs to the user that created it and is only
/// reachable through that user's session.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::fields;

/// Maximum title length, matching the column width
pub const TITLE_MAX_LENGTH: usize = 200;

/// Stored todo (read shape)
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,

    /// Owning user; never sent to clients
    #[serde(skip_serializing)]
    pub user_id: i64,

    pub title: String,
    pub description: String,
    pub completed: bool,

    /// Set by the database on insert and never updated
    pub created_at: DateTime<Utc>,
}

/// Create/update payload
///
/// Fields not listed here (an `id`, a `user`, a `created_at`) are ignored.
/// Text is trimmed before validation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TodoPayload {
    #[serde(deserialize_with = "fields::trimmed")]
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub title: String,

    #[serde(default, deserialize_with = "fields::trimmed")]
    #[validate(custom(function = "fields::no_null_characters"))]
    pub description: String,

    #[serde(default)]
    pub completed: bool,
}
