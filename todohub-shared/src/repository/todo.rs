use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{Repository, RepositoryResult};
use crate::models::todo::{Todo, TodoPayload};

const TODO_COLUMNS: &str = "id, user_id, title, description, completed, created_at";

#[derive(Debug, Clone)]
pub struct TodoRepository {
    pool: PgPool,
}

impl TodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for TodoRepository {
    type Entity = Todo;
    type Payload = TodoPayload;

    const ENTITY: &'static str = "Todo";

    async fn list(&self, owner: i64) -> RepositoryResult<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn create(&self, owner: i64, payload: TodoPayload) -> RepositoryResult<Todo> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            r#"
            INSERT INTO todos (user_id, title, description, completed)
            VALUES ($1, $2, $3, $4)
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.completed)
        .fetch_one(&self.pool)
        .await?;

        debug!(todo_id = todo.id, user_id = owner, "Created todo");
        Ok(todo)
    }

    async fn get(&self, owner: i64, id: i64) -> RepositoryResult<Todo> {
        sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(Self::not_found)
    }

    async fn update(&self, owner: i64, id: i64, payload: TodoPayload) -> RepositoryResult<Todo> {
        // created_at is never part of the SET list
        sqlx::query_as::<_, Todo>(&format!(
            r#"
            UPDATE todos
            SET title = $3, description = $4, completed = $5
            WHERE id = $1 AND user_id = $2
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(Self::not_found)
    }

    async fn delete(&self, owner: i64, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }

        debug!(todo_id = id, user_id = owner, "Deleted todo");
        Ok(())
    }
}
