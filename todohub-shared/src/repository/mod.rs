//! CRUD contract shared by every resource
//!
//! [`Repository`] is the one interface the HTTP layer talks to. Each
//! implementation maps the five operations onto single SQL statements and
//! enforces ownership inside the statement itself: lookups by id are
//! `WHERE id = $1 AND user_id = $2`, so a row owned by someone else is
//! indistinguishable from a row that does not exist.
//!
//! | Repository               | Owner-scoped |
//! |--------------------------|--------------|
//! | [`TodoRepository`]         | yes          |
//! | [`ContactRepository`]      | yes          |
//! | [`OrganizationRepository`] | no           |

use async_trait::async_trait;
use serde::Serialize;

mod contact;
mod organization;
mod todo;

pub use contact::ContactRepository;
pub use organization::OrganizationRepository;
pub use todo::TodoRepository;

/// Postgres SQLSTATE for `foreign_key_violation`
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No row with that id visible to the caller
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// The payload points at a row that does not exist
    #[error("{field}: {message}")]
    InvalidReference {
        field: &'static str,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Per-entity CRUD against PostgreSQL
///
/// `owner` is always the authenticated user's id. Repositories for entities
/// that are not owner-scoped accept and ignore it.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Stored entity, serialized in responses
    type Entity: Serialize + Send;

    /// Create/update payload, already validated by the caller
    type Payload: Send;

    /// Display name used in error messages
    const ENTITY: &'static str;

    /// All entities visible to `owner`, ordered by id
    async fn list(&self, owner: i64) -> RepositoryResult<Vec<Self::Entity>>;

    /// Persists a new entity owned by `owner`
    async fn create(&self, owner: i64, payload: Self::Payload) -> RepositoryResult<Self::Entity>;

    async fn get(&self, owner: i64, id: i64) -> RepositoryResult<Self::Entity>;

    /// Replaces every mutable field of the entity
    async fn update(
        &self,
        owner: i64,
        id: i64,
        payload: Self::Payload,
    ) -> RepositoryResult<Self::Entity>;

    /// Permanently deletes the entity; a second delete reports `NotFound`
    async fn delete(&self, owner: i64, id: i64) -> RepositoryResult<()>;

    fn not_found() -> RepositoryError {
        RepositoryError::NotFound {
            entity: Self::ENTITY,
        }
    }
}
