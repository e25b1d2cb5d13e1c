//! # todohub Seed Library
//!
//! Fills the database with random demo todos for the first user.
//!
//! ## Modules
//!
//! - `generator`: Random titles, descriptions and dates
//!
//! ## Example
//!
//! ```no_run
//! use todohub_seed::seed_todos;
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), todohub_seed::SeedError> {
//! let report = seed_todos(&pool, 50).await?;
//! println!("Created {} todos for {}", report.created, report.username);
//! # Ok(())
//! # }
//! ```

pub mod generator;

use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use todohub_shared::models::user::User;
use tracing::{debug, info};

use generator::{fake_todo, FakeTodo};

/// Rows per INSERT; 5 binds each keeps well under Postgres' 65535 limit
const ROWS_PER_STATEMENT: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("No user found in the users table")]
    NoUser,

    #[error("Count must be a positive integer, got {0:?}")]
    InvalidCount(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub user_id: i64,
    pub username: String,
    pub created: usize,
}

/// Parses the command-line count argument
pub fn parse_count(raw: &str) -> Result<usize, SeedError> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(SeedError::InvalidCount(raw.to_string())),
    }
}

/// Inserts `count` random todos owned by the user with the lowest id
///
/// All rows go in one transaction: either every todo is created or none.
pub async fn seed_todos(pool: &PgPool, count: usize) -> Result<SeedReport, SeedError> {
    if count == 0 {
        return Err(SeedError::InvalidCount(count.to_string()));
    }

    let user = User::first(pool).await?.ok_or(SeedError::NoUser)?;

    let now = Utc::now();
    let todos: Vec<FakeTodo> = {
        let mut rng = rand::thread_rng();
        (0..count).map(|_| fake_todo(&mut rng, now)).collect()
    };

    let mut tx = pool.begin().await?;
    for chunk in todos.chunks(ROWS_PER_STATEMENT) {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO todos (user_id, title, description, completed, created_at) ");
        builder.push_values(chunk, |mut row, todo| {
            row.push_bind(user.id)
                .push_bind(&todo.title)
                .push_bind(&todo.description)
                .push_bind(todo.completed)
                .push_bind(todo.created_at);
        });
        builder.build().execute(&mut *tx).await?;
        debug!(rows = chunk.len(), "Inserted batch");
    }
    tx.commit().await?;

    info!(user_id = user.id, count, "Seeded todos");

    Ok(SeedReport {
        user_id: user.id,
        username: user.username,
        created: count,
    })
}
