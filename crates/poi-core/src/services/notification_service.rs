// ============================================================================
// POI Core - Notification Service
// File: crates/poi-core/src/services/notification_service.rs
// ============================================================================
//! Persists notifications and hands them to a delivery channel

use std::sync::Arc;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};
use uuid::Uuid;

use poi_shared::Pagination;

use crate::domain::{Notification, NotificationChannel, NotificationKind, NotificationPayload};
use crate::error::DomainError;
use crate::repositories::NotificationRepository;
use crate::search::validate_pagination;

/// Real-time delivery port, implemented by the WebSocket broker.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationPublisher: Send + Sync {
    /// Returns the number of live subscribers that received the payload.
    fn publish(&self, payload: NotificationPayload) -> usize;
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub content: String,
    pub channel: NotificationChannel,
    pub metadata: Option<JsonValue>,
}

pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepository>,
    publisher: Arc<dyn NotificationPublisher>,
}

impl NotificationService {
    pub fn new(
        notification_repo: Arc<dyn NotificationRepository>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            notification_repo,
            publisher,
        }
    }

    /// Stores the notification, then attempts delivery on its channel.
    ///
    /// WebSocket delivery counts as sent once at least one subscriber
    /// received it. Email, push and SMS have no transport and stay unsent.
    pub async fn create_and_send(&self, input: NewNotification) -> Result<Notification, DomainError> {
        let mut notification = Notification::new(
            input.recipient_id,
            input.kind,
            input.title,
            input.content,
            input.channel,
            input.metadata,
        )?;
        notification = self.notification_repo.create(&notification).await?;

        match notification.channel {
            NotificationChannel::WebSocket => {
                let receivers = self.publisher.publish(notification.to_payload());
                if receivers > 0 {
                    notification.mark_sent();
                    notification = self.notification_repo.update(&notification).await?;
                    info!(
                        "Notification {} delivered to {} subscriber(s)",
                        notification.id, receivers
                    );
                } else {
                    debug!("No live subscriber for notification {}", notification.id);
                }
            }
            channel => {
                warn!(
                    "No transport for {} notifications; {} left unsent",
                    channel.as_str(),
                    notification.id
                );
            }
        }

        Ok(notification)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Notification, DomainError> {
        self.notification_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotificationNotFound(*id))
    }

    pub async fn list_for_user(
        &self,
        user_id: &Uuid,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Notification>, DomainError> {
        validate_pagination(pagination)?;
        self.notification_repo.find_by_recipient(user_id, pagination).await
    }

    /// Only the recipient may mark a notification read; repeated calls are no-ops.
    pub async fn mark_read(&self, id: &Uuid, user_id: &Uuid) -> Result<Notification, DomainError> {
        let mut notification = self.get(id).await?;
        if notification.recipient_id != *user_id {
            warn!("User {} tried to mark notification {} read", user_id, id);
            return Err(DomainError::Forbidden(
                "notification belongs to another user".to_string(),
            ));
        }
        if !notification.mark_read() {
            return Ok(notification);
        }
        self.notification_repo.update(&notification).await
    }

    pub async fn unread_count(&self, user_id: &Uuid) -> Result<i64, DomainError> {
        self.notification_repo.count_unread(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryNotificationRepository;
    use crate::repositories::MockNotificationRepository;

    fn ws_notification(recipient: Uuid) -> NewNotification {
        NewNotification {
            recipient_id: recipient,
            kind: NotificationKind::PoiCreated,
            title: "Nouveau lieu".to_string(),
            content: "Musée National a été ajouté".to_string(),
            channel: NotificationChannel::WebSocket,
            metadata: None,
        }
    }

    fn service_with(receivers: usize) -> NotificationService {
        let mut publisher = MockNotificationPublisher::new();
        publisher.expect_publish().returning(move |_| receivers);
        NotificationService::new(
            Arc::new(InMemoryNotificationRepository::new()),
            Arc::new(publisher),
        )
    }

    #[tokio::test]
    async fn test_sent_when_subscriber_listening() {
        let service = service_with(1);
        let n = service.create_and_send(ws_notification(Uuid::new_v4())).await.unwrap();
        assert!(n.sent);
        assert!(n.sent_at.is_some());
        assert!(service.get(&n.id).await.unwrap().sent);
    }

    #[tokio::test]
    async fn test_unsent_without_subscribers() {
        let service = service_with(0);
        let n = service.create_and_send(ws_notification(Uuid::new_v4())).await.unwrap();
        assert!(!n.sent);
    }

    #[tokio::test]
    async fn test_email_channel_is_not_published() {
        let mut publisher = MockNotificationPublisher::new();
        publisher.expect_publish().times(0);
        let service = NotificationService::new(
            Arc::new(InMemoryNotificationRepository::new()),
            Arc::new(publisher),
        );
        let mut input = ws_notification(Uuid::new_v4());
        input.channel = NotificationChannel::Email;
        let n = service.create_and_send(input).await.unwrap();
        assert!(!n.sent);
    }

    #[tokio::test]
    async fn test_mark_read_by_recipient_only() {
        let service = service_with(0);
        let recipient = Uuid::new_v4();
        let n = service.create_and_send(ws_notification(recipient)).await.unwrap();
        assert_eq!(service.unread_count(&recipient).await.unwrap(), 1);

        let stranger = Uuid::new_v4();
        assert!(matches!(
            service.mark_read(&n.id, &stranger).await,
            Err(DomainError::Forbidden(_))
        ));

        let read = service.mark_read(&n.id, &recipient).await.unwrap();
        assert!(read.read_at.is_some());
        let again = service.mark_read(&n.id, &recipient).await.unwrap();
        assert_eq!(again.read_at, read.read_at);
        assert_eq!(service.unread_count(&recipient).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_notification_not_stored() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_create().times(0);
        let service = NotificationService::new(Arc::new(repo), Arc::new(MockNotificationPublisher::new()));
        let mut input = ws_notification(Uuid::new_v4());
        input.content = String::new();
        assert!(service.create_and_send(input).await.is_err());
    }
}
