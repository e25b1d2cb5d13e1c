//! Session authenticator
//!
//! Turns credentials into sessions and session tokens back into users.
//! The HTTP layer owns the cookie; this module only ever sees the token
//! string inside it.
//!
//! # Example
//!
//! ```no_run
//! use todohub_shared::auth::authenticator::Authenticator;
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let auth = Authenticator::new(pool, chrono::Duration::weeks(2));
//!
//! let (user, token) = auth.login("user1", "password1").await?;
//! let identity = auth.resolve(Some(&token)).await?;
//! assert_eq!(identity.id, user.id);
//!
//! auth.logout(Some(&token)).await?;
//! assert!(auth.resolve(Some(&token)).await.is_err());
//! # Ok(())
//! # }
//! ```

use chrono::Duration;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, info};
use validator::Validate;

use crate::auth::password::{self, PasswordError, MIN_PASSWORD_LENGTH};
use crate::auth::token;
use crate::models::fields;
use crate::models::session::Session;
use crate::models::user::{CreateUser, User};

/// Postgres SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session, or the session is unknown or expired
    #[error("Authentication credentials were not provided")]
    Unauthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("The two password fields didn't match")]
    PasswordMismatch,

    /// `field` is `"username"` or `"email"`
    #[error("A user with that {field} already exists")]
    DuplicateIdentity { field: &'static str },

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Signup form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Signup {
    #[serde(deserialize_with = "fields::trimmed")]
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub username: String,

    #[serde(deserialize_with = "fields::trimmed")]
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub email: String,

    #[validate(
        length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub password: String,

    pub password2: String,
}

#[derive(Debug, Clone)]
pub struct Authenticator {
    pool: PgPool,
    session_ttl: Duration,
}

impl Authenticator {
    pub fn new(pool: PgPool, session_ttl: Duration) -> Self {
        Self { pool, session_ttl }
    }

    /// Lifetime of the sessions [`login`](Self::login) opens
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Creates an account
    ///
    /// The form is expected to have passed [`Validate`] already.
    pub async fn signup(&self, form: Signup) -> AuthResult<User> {
        if form.password != form.password2 {
            return Err(AuthError::PasswordMismatch);
        }
        if User::username_exists(&self.pool, &form.username).await? {
            return Err(AuthError::DuplicateIdentity { field: "username" });
        }
        if User::email_exists(&self.pool, &form.email).await? {
            return Err(AuthError::DuplicateIdentity { field: "email" });
        }

        let password_hash = password::hash_password(&form.password)?;

        // A concurrent signup can still win the race to the unique index
        let user = User::create(
            &self.pool,
            CreateUser {
                username: form.username,
                email: form.email,
                password_hash,
            },
        )
        .await
        .map_err(duplicate_identity)?;

        info!(user_id = user.id, username = %user.username, "User signed up");
        Ok(user)
    }

    /// Verifies credentials and opens a session
    ///
    /// Returns the user and the plaintext session token for the cookie.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<(User, String)> {
        let Some(user) = User::find_by_username(&self.pool, username).await? else {
            password::verify_dummy(password);
            debug!(username, "Login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(password, &user.password_hash)? {
            debug!(user_id = user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let purged = Session::delete_expired_for_user(&self.pool, user.id).await?;
        let (_, token) = Session::create(&self.pool, user.id, self.session_ttl).await?;
        User::update_last_login(&self.pool, user.id).await?;

        info!(user_id = user.id, purged_sessions = purged, "User logged in");
        Ok((user, token))
    }

    /// Maps a session token to the user it belongs to
    pub async fn resolve(&self, token: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let token = token
            .filter(|t| token::is_well_formed(t))
            .ok_or(AuthError::Unauthenticated)?;

        Session::find_user(&self.pool, token)
            .await?
            .map(AuthenticatedUser::from)
            .ok_or(AuthError::Unauthenticated)
    }

    /// Ends the session behind `token`, if there is one
    pub async fn logout(&self, token: Option<&str>) -> AuthResult<()> {
        if let Some(token) = token.filter(|t| token::is_well_formed(t)) {
            if Session::delete(&self.pool, token).await? {
                debug!("Session ended");
            }
        }
        Ok(())
    }
}

fn duplicate_identity(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            match db_err.constraint() {
                Some("users_username_key") => {
                    return AuthError::DuplicateIdentity { field: "username" }
                }
                Some("users_email_key") => return AuthError::DuplicateIdentity { field: "email" },
                _ => {}
            }
        }
    }
    AuthError::Database(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, password2: &str) -> Signup {
        Signup {
            username: "user1".to_string(),
            email: "user1@example.com".to_string(),
            password: password.to_string(),
            password2: password2.to_string(),
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(signup("password1", "password1").validate().is_ok());

        let errors = signup("short", "short").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let mut form = signup("password1", "password1");
        form.email = "not-an-email".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let mut form = signup("password1", "password1");
        form.username = String::new();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_signup_email_fits_the_column() {
        // Well-formed, but longer than VARCHAR(254)
        let mut form = signup("password1", "password1");
        form.email = format!(
            "{}@{}.{}.{}.com",
            "a".repeat(64),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(63)
        );
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_signup_rejects_null_characters() {
        let mut form = signup("password1", "password1");
        form.username = "user\01".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        let form = signup("pass\0word1", "pass\0word1");
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AuthError::DuplicateIdentity { field: "email" }.to_string(),
            "A user with that email already exists"
        );
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_duplicate_identity_passes_other_errors_through() {
        assert!(matches!(
            duplicate_identity(sqlx::Error::RowNotFound),
            AuthError::Database(_)
        ));
    }

    #[test]
    fn test_authenticated_user_from_user() {
        let user = User {
            id: 3,
            username: "user1".to_string(),
            email: "user1@example.com".to_string(),
            password_hash: String::new(),
            created_at: chrono::Utc::now(),
            last_login_at: None,
        };

        assert_eq!(
            AuthenticatedUser::from(user),
            AuthenticatedUser {
                id: 3,
                username: "user1".to_string()
            }
        );
    }
}
