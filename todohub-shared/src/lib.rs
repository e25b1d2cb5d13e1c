//! # todohub Shared Library
//!
//! Types, persistence and authentication shared by the todohub API server
//! and the seed tool.
//!
//! ## Module Organization
//!
//! - `models`: Database models and request payloads
//! - `repository`: Owner-scoped CRUD for todos, contacts and organizations
//! - `auth`: Password hashing, session tokens and the session authenticator
//! - `db`: Connection pool and embedded migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod repository;

/// Current version of the todohub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
