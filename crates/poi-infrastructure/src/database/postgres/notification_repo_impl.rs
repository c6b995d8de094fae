// ============================================================================
// POI Infrastructure - PostgreSQL Notification Repository
// File: crates/poi-infrastructure/src/database/postgres/notification_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use poi_core::domain::{Notification, NotificationChannel, NotificationKind};
use poi_core::error::DomainError;
use poi_core::repositories::NotificationRepository;
use poi_shared::Pagination;

use super::db_error;

const NOTIFICATION_COLUMNS: &str =
    "id, recipient_id, kind, title, content, channel, metadata, created_at, read_at, sent, sent_at";

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub channel: String,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        let kind = NotificationKind::from_str(&row.kind).unwrap_or_else(|| {
            warn!("Unknown notification kind '{}' on {}", row.kind, row.id);
            NotificationKind::System
        });
        let channel = NotificationChannel::from_str(&row.channel).unwrap_or_else(|| {
            warn!("Unknown notification channel '{}' on {}", row.channel, row.id);
            NotificationChannel::WebSocket
        });

        Notification {
            id: row.id,
            recipient_id: row.recipient_id,
            kind,
            title: row.title,
            content: row.content,
            channel,
            metadata: row.metadata,
            created_at: row.created_at,
            read_at: row.read_at,
            sent: row.sent,
            sent_at: row.sent_at,
        }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Notification>, DomainError> {
        let row: Option<NotificationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM notifications WHERE id = $1",
            NOTIFICATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding notification by id"))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_recipient(
        &self,
        recipient_id: &Uuid,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Notification>, DomainError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(recipient_id)
        .bind(pagination.map(|p| p.limit() as i64))
        .bind(pagination.map(|p| p.offset() as i64).unwrap_or(0))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing notifications"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_unread(&self, recipient_id: &Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND read_at IS NULL",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting unread notifications"))
    }

    async fn create(&self, notification: &Notification) -> Result<Notification, DomainError> {
        let row: NotificationRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO notifications ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {cols}
            "#,
            cols = NOTIFICATION_COLUMNS
        ))
        .bind(notification.id)
        .bind(notification.recipient_id)
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.content)
        .bind(notification.channel.as_str())
        .bind(&notification.metadata)
        .bind(notification.created_at)
        .bind(notification.read_at)
        .bind(notification.sent)
        .bind(notification.sent_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating notification"))?;

        Ok(row.into())
    }

    async fn update(&self, notification: &Notification) -> Result<Notification, DomainError> {
        let row: Option<NotificationRow> = sqlx::query_as(&format!(
            r#"
            UPDATE notifications
            SET read_at = $2, sent = $3, sent_at = $4
            WHERE id = $1
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(notification.id)
        .bind(notification.read_at)
        .bind(notification.sent)
        .bind(notification.sent_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating notification"))?;

        row.map(Into::into)
            .ok_or(DomainError::NotificationNotFound(notification.id))
    }
}
