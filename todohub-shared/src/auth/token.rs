/// Session token utilities
///
/// A session token is 32 random bytes, hex encoded (64 characters). The
/// plaintext token only ever lives in the client's cookie; the database keeps
/// its SHA-256 digest so a leaked `sessions` table cannot be replayed.
///
/// # Example
///
/// ```
/// use todohub_shared::auth::token::{generate_session_token, hash_session_token, is_well_formed};
///
/// let (token, hash) = generate_session_token();
/// assert!(is_well_formed(&token));
/// assert_eq!(hash, hash_session_token(&token));
/// ```

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Random bytes per token
const TOKEN_BYTES: usize = 32;

/// Length of an encoded token
pub const SESSION_TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// Generates a new session token
///
/// Returns `(plaintext_token, sha256_hex)`.
pub fn generate_session_token() -> (String, String) {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);

    let token = hex::encode(bytes);
    let hash = hash_session_token(&token);

    (token, hash)
}

/// Hex-encoded SHA-256 of a token
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cheap shape check run before touching the database
pub fn is_well_formed(token: &str) -> bool {
    token.len() == SESSION_TOKEN_LENGTH
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
