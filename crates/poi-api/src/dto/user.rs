use serde::Deserialize;
use uuid::Uuid;

use poi_core::domain::{AppUserChanges, UserRole};
use poi_core::services::NewAppUser;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub organization_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

impl From<CreateUserRequest> for NewAppUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            organization_id: req.organization_id,
            username: req.username,
            email: req.email,
            phone: req.phone,
            role: req.role,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl From<UpdateUserRequest> for AppUserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            phone: req.phone,
            role: req.role,
            is_active: req.is_active,
        }
    }
}
