/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/v1/auth/login` - Verify credentials and set the session cookie
/// - `POST /api/v1/auth/signup` - Create an account
/// - `POST /api/v1/auth/logout` - End the session and clear the cookie

use crate::{
    app::AppState,
    error::ApiResult,
    extract::ValidatedJson,
    middleware::session::{clear_session_cookie, session_cookie, session_token},
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use todohub_shared::{auth::Signup, models::fields};
use validator::Validate;

/// Where the browser goes after logging in when the client doesn't say
pub const DEFAULT_NEXT: &str = "/r/dashboard";

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        length(min = 1, message = "This field may not be blank."),
        custom(function = "fields::no_null_characters")
    )]
    pub username: String,

    #[validate(
        length(min = 1, message = "This field may not be blank."),
        custom(function = "fields::no_null_characters")
    )]
    pub password: String,

    /// Redirect hint echoed back on success
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub detail: String,
    pub next: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub detail: String,
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Login
///
/// ```text
/// POST /api/v1/auth/login
/// Content-Type: application/json
///
/// { "username": "user1", "password": "password1", "next": "/r/todos" }
/// ```
///
/// Responds 200 `{"detail": "Successfully logged in.", "next": "/r/todos"}`
/// with a `Set-Cookie` for the new session, or 401 on bad credentials.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let authenticator = state.authenticator();
    let (user, token) = authenticator.login(&req.username, &req.password).await?;
    let cookie = session_cookie(&state.config, &token, authenticator.session_ttl())?;

    tracing::info!(user_id = user.id, "Session started");

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            detail: "Successfully logged in.".to_string(),
            next: req
                .next
                .filter(|next| !next.is_empty())
                .unwrap_or_else(|| DEFAULT_NEXT.to_string()),
        }),
    ))
}

/// Signup
///
/// ```text
/// POST /api/v1/auth/signup
/// Content-Type: application/json
///
/// { "username": "user1", "email": "user1@example.com",
///   "password": "password1", "password2": "password1" }
/// ```
///
/// Responds 201 `{"detail": "User created successfully", "id": 1, "username": "user1"}`.
/// Mismatched passwords, a taken username or email, and field validation
/// failures are all 400 with the offending field named.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<Signup>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let user = state.authenticator().signup(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            detail: "User created successfully".to_string(),
            id: user.id,
            username: user.username,
        }),
    ))
}

/// Logout
///
/// Always 200, session or not, and always clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let token = session_token(&headers, &state.config.session.cookie_name);
    state.authenticator().logout(token.as_deref()).await?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie(&state.config)?)]),
        Json(DetailResponse {
            detail: "Successfully logged out.".to_string(),
        }),
    ))
}
