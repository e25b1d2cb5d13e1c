/// Session cookie authentication
///
/// [`session_auth_layer`] reads the session cookie, resolves it through the
/// [`Authenticator`](todohub_shared::auth::Authenticator) and stores the
/// resulting [`AuthenticatedUser`] in the request extensions, where handlers
/// pick it up with `Extension<AuthenticatedUser>`. Requests without a live
/// session are answered with 401 before any handler runs.
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tower_sessions::cookie::{Cookie, SameSite};

use crate::{app::AppState, config::Config, error::ApiError};

/// Finds the value of cookie `name` across all `Cookie` headers
pub fn session_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value_trimmed().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(
    config: &Config,
    token: &str,
    ttl: chrono::Duration,
) -> Result<HeaderValue, ApiError> {
    build_cookie(config, token, time::Duration::seconds(ttl.num_seconds()))
}

/// `Set-Cookie` value that makes the browser drop the session cookie
pub fn clear_session_cookie(config: &Config) -> Result<HeaderValue, ApiError> {
    build_cookie(config, "", time::Duration::ZERO)
}

fn build_cookie(
    config: &Config,
    value: &str,
    max_age: time::Duration,
) -> Result<HeaderValue, ApiError> {
    let cookie = Cookie::build((config.session.cookie_name.as_str(), value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(config.api.production)
        .build();

    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| ApiError::InternalError(format!("Invalid session cookie: {}", e)))
}

/// Rejects requests without a live session, otherwise attaches the user
pub async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = {
        let token = session_token(req.headers(), &state.config.session.cookie_name);
        state.authenticator().resolve(token.as_deref()).await?
    };

    tracing::Span::current().record("user_id", user.id);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
