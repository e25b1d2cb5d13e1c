use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{OrganizationRepository, Repository, RepositoryError, RepositoryResult, FOREIGN_KEY_VIOLATION};
use crate::models::contact::{Contact, ContactPayload, ContactRow};

const CONTACT_SELECT: &str = r#"
    SELECT c.id, c.user_id, c.first_name, c.last_name, c.email, c.phone,
           c.organization_id, o.name AS organization_name
"#;

#[derive(Debug, Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rejects payloads whose organization does not exist
    ///
    /// This is a check, not a lock. A concurrent delete of the organization
    /// surfaces as a foreign-key violation, mapped by [`reference_error`].
    async fn ensure_organization(&self, organization_id: i64) -> RepositoryResult<()> {
        let organizations = OrganizationRepository::new(self.pool.clone());
        if organizations.exists(organization_id).await? {
            Ok(())
        } else {
            Err(missing_organization())
        }
    }

    async fn is_owned(&self, owner: i64, id: i64) -> RepositoryResult<bool> {
        let owned = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM contacts WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(owned)
    }
}

fn missing_organization() -> RepositoryError {
    RepositoryError::InvalidReference {
        field: "organization_id",
        message: "Organization does not exist".to_string(),
    }
}

fn reference_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
                && db_err.constraint() == Some("contacts_organization_id_fkey") =>
        {
            missing_organization()
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl Repository for ContactRepository {
    type Entity = Contact;
    type Payload = ContactPayload;

    const ENTITY: &'static str = "Contact";

    async fn list(&self, owner: i64) -> RepositoryResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            {CONTACT_SELECT}
            FROM contacts c
            JOIN organizations o ON o.id = c.organization_id
            WHERE c.user_id = $1
            ORDER BY c.id
            "#
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn create(&self, owner: i64, payload: ContactPayload) -> RepositoryResult<Contact> {
        self.ensure_organization(payload.organization_id).await?;

        let row = sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            WITH c AS (
                INSERT INTO contacts (user_id, first_name, last_name, email, phone, organization_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            {CONTACT_SELECT}
            FROM c
            JOIN organizations o ON o.id = c.organization_id
            "#
        ))
        .bind(owner)
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.organization_id)
        .fetch_one(&self.pool)
        .await
        .map_err(reference_error)?;

        debug!(contact_id = row.id, user_id = owner, "Created contact");
        Ok(row.into())
    }

    async fn get(&self, owner: i64, id: i64) -> RepositoryResult<Contact> {
        sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            {CONTACT_SELECT}
            FROM contacts c
            JOIN organizations o ON o.id = c.organization_id
            WHERE c.id = $1 AND c.user_id = $2
            "#
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?
        .map(Contact::from)
        .ok_or_else(Self::not_found)
    }

    async fn update(&self, owner: i64, id: i64, payload: ContactPayload) -> RepositoryResult<Contact> {
        // Ownership first: a stranger's contact is NotFound whatever the payload says
        if !self.is_owned(owner, id).await? {
            return Err(Self::not_found());
        }
        self.ensure_organization(payload.organization_id).await?;

        sqlx::query_as::<_, ContactRow>(&format!(
            r#"
            WITH c AS (
                UPDATE contacts
                SET first_name = $3, last_name = $4, email = $5, phone = $6, organization_id = $7
                WHERE id = $1 AND user_id = $2
                RETURNING *
            )
            {CONTACT_SELECT}
            FROM c
            JOIN organizations o ON o.id = c.organization_id
            "#
        ))
        .bind(id)
        .bind(owner)
        .bind(payload.first_name)
        .bind(payload.last_name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.organization_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(reference_error)?
        .map(Contact::from)
        .ok_or_else(Self::not_found)
    }

    async fn delete(&self, owner: i64, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }

        debug!(contact_id = id, user_id = owner, "Deleted contact");
        Ok(())
    }
}
