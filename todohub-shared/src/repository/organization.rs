use async_trait::async_trait;
use sqlx::PgPool;

use super::{Repository, RepositoryResult};
use crate::models::organization::{Organization, OrganizationPayload};

/// Organizations are shared, so `owner` is ignored throughout
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM organizations WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}

#[async_trait]
impl Repository for OrganizationRepository {
    type Entity = Organization;
    type Payload = OrganizationPayload;

    const ENTITY: &'static str = "Organization";

    async fn list(&self, _owner: i64) -> RepositoryResult<Vec<Organization>> {
        let organizations =
            sqlx::query_as::<_, Organization>("SELECT id, name FROM organizations ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(organizations)
    }

    async fn create(&self, _owner: i64, payload: OrganizationPayload) -> RepositoryResult<Organization> {
        let organization = sqlx::query_as::<_, Organization>(
            "INSERT INTO organizations (name) VALUES ($1) RETURNING id, name",
        )
        .bind(payload.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(organization)
    }

    async fn get(&self, _owner: i64, id: i64) -> RepositoryResult<Organization> {
        sqlx::query_as::<_, Organization>("SELECT id, name FROM organizations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(Self::not_found)
    }

    async fn update(
        &self,
        _owner: i64,
        id: i64,
        payload: OrganizationPayload,
    ) -> RepositoryResult<Organization> {
        sqlx::query_as::<_, Organization>(
            "UPDATE organizations SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(payload.name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(Self::not_found)
    }

    /// Contacts pointing at the organization are removed with it
    async fn delete(&self, _owner: i64, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }

        Ok(())
    }
}
