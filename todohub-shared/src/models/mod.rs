/// Database models for todohub
///
/// # Models
///
/// - `fields`: Trimming and null-character checks for payload strings
/// - `user`: User accounts and credentials
/// - `session`: Login sessions behind the `sessionid` cookie
/// - `todo`: Owner-scoped todo items
/// - `contact`: Owner-scoped contacts, each tied to an organization
/// - `organization`: Organizations shared by all users
///
/// Entities (read shapes) derive `Serialize`; payloads (create/update shapes)
/// derive `Deserialize` and `validator::Validate`. CRUD for the three
/// resources goes through [`crate::repository::Repository`].

pub mod contact;
pub mod fields;
pub mod organization;
pub mod session;
pub mod todo;
pub mod user;
