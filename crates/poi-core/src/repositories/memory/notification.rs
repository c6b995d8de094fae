use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use poi_shared::Pagination;
use uuid::Uuid;

use crate::domain::Notification;
use crate::error::DomainError;
use crate::repositories::NotificationRepository;

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    inner: RwLock<HashMap<Uuid, Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Notification>, DomainError> {
        Ok(self.inner.read().get(id).cloned())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: &Uuid,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Notification>, DomainError> {
        let store = self.inner.read();
        let mut items: Vec<_> = store
            .values()
            .filter(|n| n.recipient_id == *recipient_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(match pagination {
            Some(p) => p.apply(items),
            None => items,
        })
    }

    async fn count_unread(&self, recipient_id: &Uuid) -> Result<i64, DomainError> {
        let store = self.inner.read();
        Ok(store
            .values()
            .filter(|n| n.recipient_id == *recipient_id && n.read_at.is_none())
            .count() as i64)
    }

    async fn create(&self, notification: &Notification) -> Result<Notification, DomainError> {
        self.inner.write().insert(notification.id, notification.clone());
        Ok(notification.clone())
    }

    async fn update(&self, notification: &Notification) -> Result<Notification, DomainError> {
        let mut store = self.inner.write();
        match store.get_mut(&notification.id) {
            Some(existing) => {
                *existing = notification.clone();
                Ok(notification.clone())
            }
            None => Err(DomainError::NotificationNotFound(notification.id)),
        }
    }
}
