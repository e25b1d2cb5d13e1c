/// Authentication primitives for todohub
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing
/// - [`token`]: Session token generation and SHA-256 hashing
/// - [`authenticator`]: Signup, login, logout and session resolution
///
/// Sessions live in the `sessions` table keyed by the token's SHA-256, so a
/// leaked database row cannot be replayed as a cookie.

pub mod authenticator;
pub mod password;
pub mod token;

pub use authenticator::{AuthError, AuthenticatedUser, Authenticator, Signup};
