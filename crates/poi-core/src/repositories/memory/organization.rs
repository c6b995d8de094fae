use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::Organization;
use crate::error::DomainError;
use crate::repositories::OrganizationRepository;

#[derive(Default)]
pub struct InMemoryOrganizationRepository {
    inner: RwLock<HashMap<Uuid, Organization>>,
}

impl InMemoryOrganizationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn code_taken(store: &HashMap<Uuid, Organization>, org: &Organization) -> bool {
    match &org.code {
        Some(code) => store
            .values()
            .any(|o| o.id != org.id && o.code.as_deref() == Some(code.as_str())),
        None => false,
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Organization>, DomainError> {
        Ok(self.inner.read().get(id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Organization>, DomainError> {
        let store = self.inner.read();
        Ok(store
            .values()
            .find(|o| o.code.as_deref() == Some(code))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Organization>, DomainError> {
        let mut orgs: Vec<_> = self.inner.read().values().cloned().collect();
        orgs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(orgs)
    }

    async fn create(&self, organization: &Organization) -> Result<Organization, DomainError> {
        let mut store = self.inner.write();
        if code_taken(&store, organization) {
            return Err(DomainError::OrganizationCodeAlreadyExists(
                organization.code.clone().unwrap_or_default(),
            ));
        }
        store.insert(organization.id, organization.clone());
        Ok(organization.clone())
    }

    async fn update(&self, organization: &Organization) -> Result<Organization, DomainError> {
        let mut store = self.inner.write();
        if !store.contains_key(&organization.id) {
            return Err(DomainError::OrganizationNotFound(organization.id));
        }
        if code_taken(&store, organization) {
            return Err(DomainError::OrganizationCodeAlreadyExists(
                organization.code.clone().unwrap_or_default(),
            ));
        }
        store.insert(organization.id, organization.clone());
        Ok(organization.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.write().remove(id).is_some())
    }
}
