/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use todohub_api::{app::{build_router, AppState}, config::Config};
/// use todohub_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    error::ApiError,
    middleware::{security::SecurityHeadersLayer, session::session_auth_layer},
    routes,
};
use axum::{
    extract::{FromRef, Request},
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use todohub_shared::{
    auth::Authenticator,
    repository::{ContactRepository, OrganizationRepository, TodoRepository},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler; both fields are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.db.clone(), self.config.session.ttl())
    }
}

impl FromRef<AppState> for TodoRepository {
    fn from_ref(state: &AppState) -> Self {
        TodoRepository::new(state.db.clone())
    }
}

impl FromRef<AppState> for ContactRepository {
    fn from_ref(state: &AppState) -> Self {
        ContactRepository::new(state.db.clone())
    }
}

impl FromRef<AppState> for OrganizationRepository {
    fn from_ref(state: &AppState) -> Self {
        OrganizationRepository::new(state.db.clone())
    }
}

/// Builds the complete router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health                       public
/// └── /api/v1/
///     ├── /auth/login, /signup, /logout public, POST only
///     ├── /todos/ and /todos/:id        session required
///     ├── /contacts/ and /contacts/:id  session required
///     └── /organizations/ and /:id      session required
/// ```
///
/// Layers, outermost first: security headers, CORS, tracing. The session
/// check is a route layer on the resource routes only, so unknown paths
/// are 404 with or without a session.
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/v1/auth/login", post(routes::auth::login))
        .route("/api/v1/auth/signup", post(routes::auth::signup))
        .route("/api/v1/auth/logout", post(routes::auth::logout));

    let resource_routes = Router::new()
        .merge(routes::resource::resource_router::<TodoRepository>("/api/v1/todos"))
        .merge(routes::resource::resource_router::<ContactRepository>("/api/v1/contacts"))
        .merge(routes::resource::resource_router::<OrganizationRepository>(
            "/api/v1/organizations",
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let cors = cors_layer(&state.config);
    let production = state.config.api.production;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(auth_routes)
        .merge(resource_routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found.".to_string())
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Explicit origins so the session cookie may ride along
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
