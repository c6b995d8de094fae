// ============================================================================
// POI Infrastructure - PostgreSQL Organization Repository
// File: crates/poi-infrastructure/src/database/postgres/organization_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use poi_core::domain::Organization;
use poi_core::error::DomainError;
use poi_core::repositories::OrganizationRepository;

use super::{db_error, is_unique_violation};

pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub org_type: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Organization {
            id: row.id,
            name: row.name,
            code: row.code,
            org_type: row.org_type,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

fn write_error(organization: &Organization) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e: sqlx::Error| {
        error!("Database error writing organization: {}", e);
        if is_unique_violation(&e) {
            DomainError::OrganizationCodeAlreadyExists(organization.code.clone().unwrap_or_default())
        } else {
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(
            r#"
            SELECT id, name, code, org_type, is_active, created_at
            FROM organizations
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding organization by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Organization>, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(
            r#"
            SELECT id, name, code, org_type, is_active, created_at
            FROM organizations
            WHERE code = $1
            "#
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding organization by code"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all(&self) -> Result<Vec<Organization>, DomainError> {
        let rows: Vec<OrganizationRow> = sqlx::query_as(
            r#"
            SELECT id, name, code, org_type, is_active, created_at
            FROM organizations
            ORDER BY name
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing organizations"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError> {
        info!("Creating organization: {}", organization.name);

        let row: OrganizationRow = sqlx::query_as(
            r#"
            INSERT INTO organizations (id, name, code, org_type, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, code, org_type, is_active, created_at
            "#
        )
        .bind(organization.id)
        .bind(&organization.name)
        .bind(&organization.code)
        .bind(&organization.org_type)
        .bind(organization.is_active)
        .bind(organization.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(organization))?;

        Ok(row.into())
    }

    async fn update(&self, organization: &Organization) -> Result<Organization, DomainError> {
        let row: Option<OrganizationRow> = sqlx::query_as(
            r#"
            UPDATE organizations
            SET name = $2, code = $3, org_type = $4, is_active = $5
            WHERE id = $1
            RETURNING id, name, code, org_type, is_active, created_at
            "#
        )
        .bind(organization.id)
        .bind(&organization.name)
        .bind(&organization.code)
        .bind(&organization.org_type)
        .bind(organization.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(organization))?;

        row.map(Into::into)
            .ok_or(DomainError::OrganizationNotFound(organization.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting organization"))?;

        Ok(result.rows_affected() > 0)
    }
}
