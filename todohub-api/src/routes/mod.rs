/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Login, signup and logout
/// - `resource`: Generic CRUD handlers shared by todos, contacts and organizations

pub mod auth;
pub mod health;
pub mod resource;
