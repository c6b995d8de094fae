//! Application user management

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{AppUser, AppUserChanges, UserRole};
use crate::error::DomainError;
use crate::repositories::{AppUserRepository, OrganizationRepository};

/// Fields accepted when registering a user
#[derive(Debug, Clone)]
pub struct NewAppUser {
    pub organization_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
}

pub struct UserService {
    user_repo: Arc<dyn AppUserRepository>,
    org_repo: Arc<dyn OrganizationRepository>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn AppUserRepository>,
        org_repo: Arc<dyn OrganizationRepository>,
    ) -> Self {
        Self { user_repo, org_repo }
    }

    pub async fn create(&self, input: NewAppUser) -> Result<AppUser, DomainError> {
        if self.org_repo.find_by_id(&input.organization_id).await?.is_none() {
            return Err(DomainError::OrganizationNotFound(input.organization_id));
        }

        let user = AppUser::new(
            input.organization_id,
            input.username,
            input.email,
            input.phone,
            input.role,
        )?;
        self.ensure_unique(&user).await?;

        let created = self.user_repo.create(&user).await?;
        info!("User created: {} ({})", created.username, created.id);
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<AppUser, DomainError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(*id))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError> {
        self.user_repo.find_by_username(username.trim()).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AppUser>, DomainError> {
        self.user_repo.find_by_email(&email.trim().to_lowercase()).await
    }

    pub async fn list(&self) -> Result<Vec<AppUser>, DomainError> {
        self.user_repo.find_all().await
    }

    pub async fn update(&self, id: &Uuid, changes: AppUserChanges) -> Result<AppUser, DomainError> {
        let mut user = self.get(id).await?;
        user.apply_changes(changes)?;
        self.ensure_unique(&user).await?;

        let updated = self.user_repo.update(&user).await?;
        info!("User updated: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        if !self.user_repo.delete(id).await? {
            return Err(DomainError::UserNotFound(*id));
        }
        info!("User deleted: {}", id);
        Ok(())
    }

    async fn ensure_unique(&self, user: &AppUser) -> Result<(), DomainError> {
        if let Some(other) = self.user_repo.find_by_username(&user.username).await? {
            if other.id != user.id {
                warn!("Username already exists: {}", user.username);
                return Err(DomainError::UsernameAlreadyExists(user.username.clone()));
            }
        }
        if let Some(email) = &user.email {
            if let Some(other) = self.user_repo.find_by_email(email).await? {
                if other.id != user.id {
                    warn!("Email already exists: {}", email);
                    return Err(DomainError::EmailAlreadyExists(email.clone()));
                }
            }
        }
        Ok(())
    }
}
