use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::AppUser;
use crate::error::DomainError;
use crate::repositories::AppUserRepository;

#[derive(Default)]
pub struct InMemoryAppUserRepository {
    inner: RwLock<HashMap<Uuid, AppUser>>,
}

impl InMemoryAppUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Mirrors the unique indexes on `username` and `email`.
fn check_unique(store: &HashMap<Uuid, AppUser>, user: &AppUser) -> Result<(), DomainError> {
    for other in store.values().filter(|u| u.id != user.id) {
        if other.username == user.username {
            return Err(DomainError::UsernameAlreadyExists(user.username.clone()));
        }
        if let (Some(a), Some(b)) = (&other.email, &user.email) {
            if a == b {
                return Err(DomainError::EmailAlreadyExists(b.clone()));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl AppUserRepository for InMemoryAppUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<AppUser>, DomainError> {
        Ok(self.inner.read().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError> {
        let store = self.inner.read();
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AppUser>, DomainError> {
        let email = email.to_lowercase();
        let store = self.inner.read();
        Ok(store
            .values()
            .find(|u| u.email.as_deref() == Some(email.as_str()))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<AppUser>, DomainError> {
        let mut users: Vec<_> = self.inner.read().values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn create(&self, user: &AppUser) -> Result<AppUser, DomainError> {
        let mut store = self.inner.write();
        check_unique(&store, user)?;
        store.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &AppUser) -> Result<AppUser, DomainError> {
        let mut store = self.inner.write();
        if !store.contains_key(&user.id) {
            return Err(DomainError::UserNotFound(user.id));
        }
        check_unique(&store, user)?;
        store.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.write().remove(id).is_some())
    }
}
