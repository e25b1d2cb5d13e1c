/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool": { "active_connections": 1, "idle_connections": 4 }
/// }
/// ```
///
/// Always 200; a failed database check shows up as `"status": "degraded"`.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use todohub_shared::db::pool::{get_pool_stats, health_check as ping_database};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub pool: PoolResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolResponse {
    pub active_connections: usize,
    pub idle_connections: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match ping_database(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    let stats = get_pool_stats(&state.db);

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        pool: PoolResponse {
            active_connections: stats.active_connections,
            idle_connections: stats.idle_connections,
        },
    })
}
