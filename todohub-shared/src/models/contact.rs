/// Contacts
///
/// Owner-scoped like todos, and each contact points at an organization. The
/// read shape carries both the flat `organization_id` and the nested
/// organization so clients can render it without a second request.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE contacts (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     first_name VARCHAR(100) NOT NULL,
///     last_name VARCHAR(100) NOT NULL,
///     email VARCHAR(254) NOT NULL,
///     phone VARCHAR(20),
///     organization_id BIGINT NOT NULL REFERENCES organizations (id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::fields;
use super::organization::Organization;

/// Stored contact (read shape)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: i64,

    #[serde(skip_serializing)]
    pub user_id: i64,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization_id: i64,
    pub organization: Organization,
}

/// Flat row from `contacts JOIN organizations`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactRow {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization_id: i64,
    pub organization_name: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            organization_id: row.organization_id,
            organization: Organization {
                id: row.organization_id,
                name: row.organization_name,
            },
        }
    }
}

/// Create/update payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactPayload {
    #[serde(deserialize_with = "fields::trimmed")]
    #[validate(
        length(min = 1, max = 100, message = "First name must be 1-100 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub first_name: String,

    #[serde(deserialize_with = "fields::trimmed")]
    #[validate(
        length(min = 1, max = 100, message = "Last name must be 1-100 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub last_name: String,

    #[serde(deserialize_with = "fields::trimmed")]
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "Email must be at most 254 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub email: String,

    #[serde(default, deserialize_with = "fields::trimmed_option")]
    #[validate(
        length(max = 20, message = "Phone must be at most 20 characters"),
        custom(function = "fields::no_null_characters")
    )]
    pub phone: Option<String>,

    pub organization_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> ContactPayload {
        ContactPayload {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: None,
            organization_id: 1,
        }
    }

    #[test]
    fn test_valid_payload() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let invalid = ContactPayload {
            email: "not-an-email".to_string(),
            ..payload()
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_phone_length() {
        let invalid = ContactPayload {
            phone: Some("1".repeat(21)),
            ..payload()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_null_characters_rejected_per_field() {
        let cases = [
            ("first_name", ContactPayload { first_name: "Jo\0hn".to_string(), ..payload() }),
            ("last_name", ContactPayload { last_name: "Doe\0".to_string(), ..payload() }),
            ("phone", ContactPayload { phone: Some("555\00100".to_string()), ..payload() }),
        ];
        for (field, invalid) in cases {
            let errors = invalid.validate().unwrap_err();
            assert!(errors.field_errors().contains_key(field), "{} not rejected", field);
        }
    }

    #[test]
    fn test_phone_defaults_to_none() {
        let parsed: ContactPayload = serde_json::from_value(json!({
            "first_name": "Jane",
            "last_name": "Roe",
            "email": "jane@example.com",
            "organization_id": 3
        }))
        .unwrap();
        assert!(parsed.phone.is_none());
    }

    #[test]
    fn test_row_conversion_nests_organization() {
        let contact = Contact::from(ContactRow {
            id: 5,
            user_id: 9,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            organization_id: 2,
            organization_name: "Test Org".to_string(),
        });

        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["organization_id"], 2);
        assert_eq!(json["organization"], json!({ "id": 2, "name": "Test Org" }));
        assert!(json.get("user_id").is_none());
    }
}
