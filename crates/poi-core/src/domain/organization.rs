//! Organization domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Organization {
    pub id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Organization name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Organization code must be between 1 and 50 characters"))]
    pub code: Option<String>,

    pub org_type: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationChanges {
    pub name: Option<String>,
    pub code: Option<String>,
    pub org_type: Option<String>,
    pub is_active: Option<bool>,
}

impl Organization {
    pub fn new(
        name: String,
        code: Option<String>,
        org_type: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let organization = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            code: code.map(|c| c.trim().to_uppercase()),
            org_type: org_type.map(|t| t.trim().to_string()),
            is_active: true,
            created_at: Utc::now(),
        };

        organization.validate()?;
        Ok(organization)
    }

    pub fn apply_changes(
        &mut self,
        changes: OrganizationChanges,
    ) -> Result<(), validator::ValidationErrors> {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(code) = changes.code {
            self.code = Some(code.trim().to_uppercase());
        }
        if let Some(org_type) = changes.org_type {
            self.org_type = Some(org_type.trim().to_string());
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.validate()
    }
}
