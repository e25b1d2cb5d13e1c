/// Integration tests for the session authenticator
///
/// These tests require a running PostgreSQL database (see `common`).

mod common;

use chrono::Duration;
use common::{create_user, setup_pool, unique_name, TEST_PASSWORD};
use todohub_shared::auth::token::hash_session_token;
use todohub_shared::auth::{AuthError, Authenticator, Signup};
use todohub_shared::models::user::User;

fn signup_form(username: &str) -> Signup {
    Signup {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: TEST_PASSWORD.to_string(),
        password2: TEST_PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn test_signup_then_login() {
    let pool = setup_pool().await;
    let auth = Authenticator::new(pool.clone(), Duration::hours(1));
    let username = unique_name("signup");

    let user = auth.signup(signup_form(&username)).await.expect("Signup failed");
    assert_eq!(user.username, username);
    assert!(user.password_hash.starts_with("$argon2id$"));

    let (logged_in, token) = auth.login(&username, TEST_PASSWORD).await.expect("Login failed");
    assert_eq!(logged_in.id, user.id);

    let identity = auth.resolve(Some(&token)).await.expect("Resolve failed");
    assert_eq!(identity.id, user.id);
    assert_eq!(identity.username, username);

    let refreshed = User::find_by_id(&pool, user.id)
        .await
        .expect("Lookup failed")
        .expect("User should exist");
    assert!(refreshed.last_login_at.is_some());
}

#[tokio::test]
async fn test_signup_rejections() {
    let pool = setup_pool().await;
    let auth = Authenticator::new(pool.clone(), Duration::hours(1));
    let existing = create_user(&pool, "taken").await;

    let mut form = signup_form(&unique_name("mismatch"));
    form.password2 = "different1".to_string();
    assert!(matches!(auth.signup(form).await, Err(AuthError::PasswordMismatch)));

    let form = signup_form(&existing.username);
    assert!(matches!(
        auth.signup(form).await,
        Err(AuthError::DuplicateIdentity { field: "username" })
    ));

    let mut form = signup_form(&unique_name("fresh"));
    form.email = existing.email.to_uppercase();
    assert!(matches!(
        auth.signup(form).await,
        Err(AuthError::DuplicateIdentity { field: "email" })
    ));
}

#[tokio::test]
async fn test_login_with_bad_credentials() {
    let pool = setup_pool().await;
    let auth = Authenticator::new(pool.clone(), Duration::hours(1));
    let user = create_user(&pool, "badcreds").await;

    assert!(matches!(
        auth.login(&user.username, "wrong-password").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.login(&unique_name("nobody"), TEST_PASSWORD).await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_resolve_rejects_missing_and_malformed_tokens() {
    let pool = setup_pool().await;
    let auth = Authenticator::new(pool, Duration::hours(1));
    let unknown = "f".repeat(64);

    for token in [None, Some(""), Some("not-a-token"), Some(unknown.as_str())] {
        assert!(matches!(
            auth.resolve(token).await,
            Err(AuthError::Unauthenticated)
        ));
    }
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let pool = setup_pool().await;
    let auth = Authenticator::new(pool.clone(), Duration::hours(1));
    let user = create_user(&pool, "logout").await;

    let (_, token) = auth.login(&user.username, TEST_PASSWORD).await.expect("Login failed");

    auth.logout(Some(&token)).await.expect("First logout failed");
    auth.logout(Some(&token)).await.expect("Second logout failed");
    auth.logout(None).await.expect("Anonymous logout failed");

    assert!(matches!(
        auth.resolve(Some(&token)).await,
        Err(AuthError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_expired_session_is_rejected_and_purged() {
    let pool = setup_pool().await;
    let auth = Authenticator::new(pool.clone(), Duration::hours(1));
    let user = create_user(&pool, "expired").await;

    let (_, token) = auth.login(&user.username, TEST_PASSWORD).await.expect("Login failed");
    sqlx::query("UPDATE sessions SET expires_at = NOW() - INTERVAL '1 minute' WHERE token_hash = $1")
        .bind(hash_session_token(&token))
        .execute(&pool)
        .await
        .expect("Expire failed");

    assert!(matches!(
        auth.resolve(Some(&token)).await,
        Err(AuthError::Unauthenticated)
    ));

    // The next login clears the dead row
    auth.login(&user.username, TEST_PASSWORD).await.expect("Login failed");
    let stale: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE token_hash = $1")
        .bind(hash_session_token(&token))
        .fetch_one(&pool)
        .await
        .expect("Count failed");
    assert_eq!(stale, 0);
}
