/// Integration tests for database migrations
///
/// These tests require a running PostgreSQL database.
/// Run with: cargo test --test db_migrations_tests

mod common;

use common::setup_pool;
use todohub_shared::db::migrations::{get_migration_status, run_migrations};
use todohub_shared::db::pool::close_pool;

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = setup_pool().await;

    let before = get_migration_status(&pool).await.expect("Failed to get status");
    run_migrations(&pool).await.expect("Second migration run failed");
    let after = get_migration_status(&pool).await.expect("Failed to get status");

    assert_eq!(before.applied_migrations, after.applied_migrations);
    assert!(after.is_up_to_date, "Should be up to date after migrations");
    assert!(after.latest_version.is_some());

    close_pool(pool).await;
}

#[tokio::test]
async fn test_migration_creates_all_tables() {
    let pool = setup_pool().await;

    for table_name in ["users", "sessions", "todos", "organizations", "contacts"] {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_schema = 'public'
                AND table_name = $1
            )",
        )
        .bind(table_name)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to check for table {}: {}", table_name, e));

        assert!(exists, "Table '{}' should exist after migrations", table_name);
    }

    close_pool(pool).await;
}

#[tokio::test]
async fn test_todo_defaults() {
    let pool = setup_pool().await;
    let user = common::create_user(&pool, "defaults").await;

    let (description, completed): (String, bool) = sqlx::query_as(
        "INSERT INTO todos (user_id, title) VALUES ($1, 'X') RETURNING description, completed",
    )
    .bind(user.id)
    .fetch_one(&pool)
    .await
    .expect("Insert failed");

    assert_eq!(description, "");
    assert!(!completed);

    close_pool(pool).await;
}
