//! User notification domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    PoiCreated,
    PoiUpdated,
    ReviewPosted,
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::PoiCreated => "POI_CREATED",
            NotificationKind::PoiUpdated => "POI_UPDATED",
            NotificationKind::ReviewPosted => "REVIEW_POSTED",
            NotificationKind::System => "SYSTEM",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "POI_CREATED" => Some(NotificationKind::PoiCreated),
            "POI_UPDATED" => Some(NotificationKind::PoiUpdated),
            "REVIEW_POSTED" => Some(NotificationKind::ReviewPosted),
            "SYSTEM" => Some(NotificationKind::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationChannel {
    WebSocket,
    Email,
    Push,
    Sms,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::WebSocket => "WEB_SOCKET",
            NotificationChannel::Email => "EMAIL",
            NotificationChannel::Push => "PUSH",
            NotificationChannel::Sms => "SMS",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "WEB_SOCKET" => Some(NotificationChannel::WebSocket),
            "EMAIL" => Some(NotificationChannel::Email),
            "PUSH" => Some(NotificationChannel::Push),
            "SMS" => Some(NotificationChannel::Sms),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub kind: NotificationKind,

    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub channel: NotificationChannel,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

/// What a connected client receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub content: String,
    pub metadata: Option<JsonValue>,
    pub timestamp: String,
}

impl Notification {
    pub fn new(
        recipient_id: Uuid,
        kind: NotificationKind,
        title: String,
        content: String,
        channel: NotificationChannel,
        metadata: Option<JsonValue>,
    ) -> Result<Self, validator::ValidationErrors> {
        let notification = Self {
            id: Uuid::new_v4(),
            recipient_id,
            kind,
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            channel,
            metadata,
            created_at: Utc::now(),
            read_at: None,
            sent: false,
            sent_at: None,
        };

        notification.validate()?;
        Ok(notification)
    }

    pub fn mark_sent(&mut self) {
        self.sent = true;
        self.sent_at = Some(Utc::now());
    }

    /// Returns `false` when the notification was already read.
    pub fn mark_read(&mut self) -> bool {
        if self.read_at.is_some() {
            return false;
        }
        self.read_at = Some(Utc::now());
        true
    }

    pub fn to_payload(&self) -> NotificationPayload {
        NotificationPayload {
            id: self.id,
            recipient_id: self.recipient_id,
            kind: self.kind,
            title: self.title.clone(),
            content: self.content.clone(),
            metadata: self.metadata.clone(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
