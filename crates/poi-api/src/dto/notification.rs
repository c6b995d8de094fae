use serde::Deserialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use poi_core::domain::{NotificationChannel, NotificationKind};
use poi_core::services::NewNotification;

#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    pub recipient_id: Uuid,
    pub kind: Option<NotificationKind>,
    pub title: String,
    pub content: String,
    pub channel: Option<NotificationChannel>,
    pub metadata: Option<JsonValue>,
}

impl From<CreateNotificationRequest> for NewNotification {
    fn from(req: CreateNotificationRequest) -> Self {
        Self {
            recipient_id: req.recipient_id,
            kind: req.kind.unwrap_or(NotificationKind::System),
            title: req.title,
            content: req.content,
            channel: req.channel.unwrap_or(NotificationChannel::WebSocket),
            metadata: req.metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeParams {
    pub user_id: Uuid,
}
