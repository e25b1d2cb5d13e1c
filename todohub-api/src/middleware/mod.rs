/// Middleware for the API server
///
/// - `security`: Security response headers
/// - `session`: Session cookie authentication

pub mod security;
pub mod session;
