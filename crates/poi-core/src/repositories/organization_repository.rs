//! Organization repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Organization;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Organization>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Organization>, DomainError>;
    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError>;
    async fn update(&self, organization: &Organization) -> Result<Organization, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}
