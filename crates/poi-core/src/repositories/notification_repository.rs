//! Notification repository trait (port)

use async_trait::async_trait;
use poi_shared::Pagination;
use uuid::Uuid;
use crate::domain::Notification;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Notification>, DomainError>;
    /// Newest first
    async fn find_by_recipient(
        &self,
        recipient_id: &Uuid,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Notification>, DomainError>;
    async fn count_unread(&self, recipient_id: &Uuid) -> Result<i64, DomainError>;
    async fn create(&self, notification: &Notification) -> Result<Notification, DomainError>;
    async fn update(&self, notification: &Notification) -> Result<Notification, DomainError>;
}
