/// Generic CRUD endpoints over a [`Repository`]
///
/// One set of handlers serves todos, contacts and organizations; each
/// resource is a [`resource_router`] instantiated with its repository type.
///
/// # Endpoints
///
/// ```text
/// GET    {base}/       list      200 [entity, ...]
/// POST   {base}/       create    201 entity
/// GET    {base}/:id    retrieve  200 entity
/// PUT    {base}/:id    update    200 entity
/// DELETE {base}/:id    destroy   204
/// ```
///
/// Any other method on those paths is a 405. Handlers expect an
/// [`AuthenticatedUser`] extension, so the router must sit behind
/// [`crate::middleware::session::session_auth_layer`].

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, MethodRouter},
    Extension, Json, Router,
};
use serde::de::DeserializeOwned;
use todohub_shared::{auth::AuthenticatedUser, repository::Repository};
use tracing::debug;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Id, ValidatedJson},
};

/// Routes for one resource mounted at `base` (no trailing slash)
pub fn resource_router<R>(base: &str) -> Router<AppState>
where
    R: Repository + FromRef<AppState> + 'static,
    R::Payload: DeserializeOwned + Validate + 'static,
    R::Entity: 'static,
{
    let collection = || -> MethodRouter<AppState> {
        get(list::<R>).post(create::<R>).fallback(method_not_allowed)
    };
    let member = || -> MethodRouter<AppState> {
        get(retrieve::<R>)
            .put(update::<R>)
            .delete(destroy::<R>)
            .fallback(method_not_allowed)
    };

    Router::new()
        .route(base, collection())
        .route(&format!("{}/", base), collection())
        .route(&format!("{}/:id", base), member())
        .route(&format!("{}/:id/", base), member())
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn list<R: Repository>(
    State(repo): State<R>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<R::Entity>>> {
    let entities = repo.list(user.id).await?;
    Ok(Json(entities))
}

async fn create<R: Repository>(
    State(repo): State<R>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(payload): ValidatedJson<R::Payload>,
) -> ApiResult<(StatusCode, Json<R::Entity>)> {
    let entity = repo.create(user.id, payload).await?;
    debug!(entity = R::ENTITY, user_id = user.id, "Created");
    Ok((StatusCode::CREATED, Json(entity)))
}

async fn retrieve<R: Repository>(
    State(repo): State<R>,
    Extension(user): Extension<AuthenticatedUser>,
    Id(id): Id,
) -> ApiResult<Json<R::Entity>> {
    Ok(Json(repo.get(user.id, id).await?))
}

async fn update<R: Repository>(
    State(repo): State<R>,
    Extension(user): Extension<AuthenticatedUser>,
    Id(id): Id,
    ValidatedJson(payload): ValidatedJson<R::Payload>,
) -> ApiResult<Json<R::Entity>> {
    Ok(Json(repo.update(user.id, id, payload).await?))
}

async fn destroy<R: Repository>(
    State(repo): State<R>,
    Extension(user): Extension<AuthenticatedUser>,
    Id(id): Id,
) -> ApiResult<StatusCode> {
    repo.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
