//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Point of interest not found: {0}")]
    PoiNotFound(Uuid),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Review not found: {0}")]
    ReviewNotFound(Uuid),

    #[error("Access log not found: {0}")]
    AccessLogNotFound(Uuid),

    #[error("Platform stat not found: {0}")]
    StatNotFound(Uuid),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Uuid),

    #[error("Organization code already exists: {0}")]
    OrganizationCodeAlreadyExists(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::PoiNotFound(_)
                | DomainError::OrganizationNotFound(_)
                | DomainError::UserNotFound(_)
                | DomainError::ReviewNotFound(_)
                | DomainError::AccessLogNotFound(_)
                | DomainError::StatNotFound(_)
                | DomainError::NotificationNotFound(_)
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::OrganizationCodeAlreadyExists(_)
                | DomainError::UsernameAlreadyExists(_)
                | DomainError::EmailAlreadyExists(_)
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
