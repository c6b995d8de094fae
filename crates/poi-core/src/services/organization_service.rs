//! Organization management

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Organization, OrganizationChanges};
use crate::error::DomainError;
use crate::repositories::OrganizationRepository;

pub struct OrganizationService {
    org_repo: Arc<dyn OrganizationRepository>,
}

impl OrganizationService {
    pub fn new(org_repo: Arc<dyn OrganizationRepository>) -> Self {
        Self { org_repo }
    }

    pub async fn create(
        &self,
        name: &str,
        code: Option<&str>,
        org_type: Option<&str>,
    ) -> Result<Organization, DomainError> {
        let organization = Organization::new(
            name.to_string(),
            code.map(str::to_string),
            org_type.map(str::to_string),
        )?;

        if let Some(code) = &organization.code {
            if self.org_repo.find_by_code(code).await?.is_some() {
                warn!("Organization code already exists: {}", code);
                return Err(DomainError::OrganizationCodeAlreadyExists(code.clone()));
            }
        }

        let created = self.org_repo.create(&organization).await?;
        info!("Organization created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Organization, DomainError> {
        self.org_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::OrganizationNotFound(*id))
    }

    pub async fn list(&self) -> Result<Vec<Organization>, DomainError> {
        self.org_repo.find_all().await
    }

    pub async fn update(
        &self,
        id: &Uuid,
        changes: OrganizationChanges,
    ) -> Result<Organization, DomainError> {
        let mut organization = self.get(id).await?;
        organization.apply_changes(changes)?;

        if let Some(code) = &organization.code {
            if let Some(other) = self.org_repo.find_by_code(code).await? {
                if other.id != organization.id {
                    return Err(DomainError::OrganizationCodeAlreadyExists(code.clone()));
                }
            }
        }

        let updated = self.org_repo.update(&organization).await?;
        info!("Organization updated: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        if !self.org_repo.delete(id).await? {
            return Err(DomainError::OrganizationNotFound(*id));
        }
        info!("Organization deleted: {}", id);
        Ok(())
    }
}
