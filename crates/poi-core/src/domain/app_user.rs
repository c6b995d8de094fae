//! Application user domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
            UserRole::SuperAdmin => "SUPER_ADMIN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USER" => Some(UserRole::User),
            "ADMIN" => Some(UserRole::Admin),
            "SUPER_ADMIN" => Some(UserRole::SuperAdmin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppUser {
    pub id: Uuid,
    pub organization_id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Username must be between 2 and 100 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AppUserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl AppUser {
    pub fn new(
        organization_id: Uuid,
        username: String,
        email: Option<String>,
        phone: Option<String>,
        role: UserRole,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            organization_id,
            username: username.trim().to_string(),
            email: email.map(|e| e.trim().to_lowercase()),
            phone: phone.map(|p| p.trim().to_string()),
            role,
            is_active: true,
            created_at: Utc::now(),
        };

        user.validate()?;
        Ok(user)
    }

    pub fn apply_changes(&mut self, changes: AppUserChanges) -> Result<(), validator::ValidationErrors> {
        if let Some(username) = changes.username {
            self.username = username.trim().to_string();
        }
        if let Some(email) = changes.email {
            self.email = Some(email.trim().to_lowercase());
        }
        if let Some(phone) = changes.phone {
            self.phone = Some(phone.trim().to_string());
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.validate()
    }
}
