//! # todohub Seed
//!
//! Creates random demo todos for the first user.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p todohub-seed -- 50
//! ```

use anyhow::Context;
use todohub_seed::{parse_count, seed_todos};
use todohub_shared::db::{
    migrations::run_migrations,
    pool::{close_pool, create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todohub_seed=info,todohub_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let raw = std::env::args()
        .nth(1)
        .context("usage: todohub-seed <count>")?;
    let count = parse_count(&raw)?;

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;
    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 2,
        ..Default::default()
    })
    .await
    .context("Failed to connect to the database")?;
    run_migrations(&pool).await?;

    let report = seed_todos(&pool, count).await;
    close_pool(pool).await;
    let report = report?;

    tracing::info!(
        "Successfully created {} todos for user {}",
        report.created,
        report.username
    );

    Ok(())
}
