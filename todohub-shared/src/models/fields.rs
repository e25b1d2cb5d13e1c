//! Field-level helpers shared by the request payloads
//!
//! PostgreSQL text columns cannot hold U+0000, so every string that is
//! stored (or bound into a query) goes through [`no_null_characters`].
//! Text fields are trimmed on the way in, so `"   "` is blank.
//!
//! ```ignore
//! #[serde(deserialize_with = "fields::trimmed")]
//! #[validate(custom(function = "fields::no_null_characters"))]
//! pub title: String,
//! ```

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

pub fn no_null_characters(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        let mut error = ValidationError::new("null_characters_not_allowed");
        error.message = Some("Null characters are not allowed.".into());
        return Err(error);
    }
    Ok(())
}

pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Like [`trimmed`]; `null` stays `None`
pub fn trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|value| value.trim().to_string()))
}
