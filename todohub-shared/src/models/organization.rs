/// Organizations
///
/// Not owner-scoped: any authenticated user can list, read, create, update
/// or delete any organization. Contacts reference them by id.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::fields;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrganizationPayload {
    #[serde(deserialize_with = "fields::trimmed")]
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub name: String,
}
