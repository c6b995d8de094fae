// ============================================================================
// POI Infrastructure - PostgreSQL Access Log Repository
// File: crates/poi-infrastructure/src/database/postgres/access_log_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use poi_core::domain::{PlatformCount, PoiAccessLog};
use poi_core::error::DomainError;
use poi_core::repositories::PoiAccessLogRepository;
use poi_shared::Pagination;

use super::db_error;

const LOG_COLUMNS: &str =
    "id, poi_id, organization_id, platform_type, user_id, access_type, accessed_at, metadata";

pub struct PgPoiAccessLogRepository {
    pool: PgPool,
}

impl PgPoiAccessLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccessLogRow {
    pub id: Uuid,
    pub poi_id: Uuid,
    pub organization_id: Uuid,
    pub platform_type: String,
    pub user_id: Option<Uuid>,
    pub access_type: Option<String>,
    pub accessed_at: DateTime<Utc>,
    pub metadata: Option<JsonValue>,
}

impl From<AccessLogRow> for PoiAccessLog {
    fn from(row: AccessLogRow) -> Self {
        PoiAccessLog {
            id: row.id,
            poi_id: row.poi_id,
            organization_id: row.organization_id,
            platform_type: row.platform_type,
            user_id: row.user_id,
            access_type: row.access_type,
            accessed_at: row.accessed_at,
            metadata: row.metadata,
        }
    }
}

#[derive(Debug, FromRow)]
struct PlatformCountRow {
    pub platform_type: String,
    pub count: i64,
}

fn into_logs(rows: Vec<AccessLogRow>) -> Vec<PoiAccessLog> {
    rows.into_iter().map(Into::into).collect()
}

#[async_trait]
impl PoiAccessLogRepository for PgPoiAccessLogRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiAccessLog>, DomainError> {
        let row: Option<AccessLogRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_access_logs WHERE id = $1",
            LOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding access log by id"))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_poi(
        &self,
        poi_id: &Uuid,
        pagination: Option<Pagination>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        // LIMIT NULL means no limit in PostgreSQL
        let rows: Vec<AccessLogRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM poi_access_logs
            WHERE poi_id = $1
            ORDER BY accessed_at DESC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            LOG_COLUMNS
        ))
        .bind(poi_id)
        .bind(pagination.map(|p| p.limit() as i64))
        .bind(pagination.map(|p| p.offset() as i64).unwrap_or(0))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing access logs by POI"))?;

        Ok(into_logs(rows))
    }

    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiAccessLog>, DomainError> {
        let rows: Vec<AccessLogRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_access_logs WHERE organization_id = $1 ORDER BY accessed_at DESC, id ASC",
            LOG_COLUMNS
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing access logs by organization"))?;

        Ok(into_logs(rows))
    }

    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<PoiAccessLog>, DomainError> {
        let rows: Vec<AccessLogRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_access_logs WHERE user_id = $1 ORDER BY accessed_at DESC, id ASC",
            LOG_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing access logs by user"))?;

        Ok(into_logs(rows))
    }

    async fn find_by_access_type(&self, access_type: &str) -> Result<Vec<PoiAccessLog>, DomainError> {
        let rows: Vec<AccessLogRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_access_logs WHERE access_type = $1 ORDER BY accessed_at DESC, id ASC",
            LOG_COLUMNS
        ))
        .bind(access_type)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing access logs by access type"))?;

        Ok(into_logs(rows))
    }

    async fn find_by_platform(&self, platform_type: &str) -> Result<Vec<PoiAccessLog>, DomainError> {
        let rows: Vec<AccessLogRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_access_logs WHERE platform_type = $1 ORDER BY accessed_at DESC, id ASC",
            LOG_COLUMNS
        ))
        .bind(platform_type)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing access logs by platform"))?;

        Ok(into_logs(rows))
    }

    async fn find_by_poi_and_organization(
        &self,
        poi_id: &Uuid,
        organization_id: &Uuid,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        let rows: Vec<AccessLogRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM poi_access_logs
            WHERE poi_id = $1 AND organization_id = $2
            ORDER BY accessed_at DESC, id ASC
            "#,
            LOG_COLUMNS
        ))
        .bind(poi_id)
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing access logs by POI and organization"))?;

        Ok(into_logs(rows))
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        let rows: Vec<AccessLogRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM poi_access_logs
            WHERE accessed_at BETWEEN $1 AND $2
            ORDER BY accessed_at DESC, id ASC
            "#,
            LOG_COLUMNS
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing access logs by date range"))?;

        Ok(into_logs(rows))
    }

    async fn find_recent_by_poi(
        &self,
        poi_id: &Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<PoiAccessLog>, DomainError> {
        let rows: Vec<AccessLogRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM poi_access_logs
            WHERE poi_id = $1 AND accessed_at >= $2
            ORDER BY accessed_at DESC, id ASC
            "#,
            LOG_COLUMNS
        ))
        .bind(poi_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing recent access logs"))?;

        Ok(into_logs(rows))
    }

    async fn count_by_poi(&self, poi_id: &Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM poi_access_logs WHERE poi_id = $1")
            .bind(poi_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting access logs"))
    }

    async fn count_by_poi_and_access_type(
        &self,
        poi_id: &Uuid,
        access_type: &str,
    ) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM poi_access_logs WHERE poi_id = $1 AND access_type = $2",
        )
        .bind(poi_id)
        .bind(access_type)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting access logs by type"))
    }

    async fn platform_counts_by_organization(
        &self,
        organization_id: &Uuid,
    ) -> Result<Vec<PlatformCount>, DomainError> {
        let rows: Vec<PlatformCountRow> = sqlx::query_as(
            r#"
            SELECT platform_type, COUNT(*) AS count
            FROM poi_access_logs
            WHERE organization_id = $1
            GROUP BY platform_type
            ORDER BY count DESC, platform_type ASC
            "#
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("counting access logs by platform"))?;

        Ok(rows
            .into_iter()
            .map(|r| PlatformCount {
                platform_type: r.platform_type,
                count: r.count,
            })
            .collect())
    }

    async fn create(&self, log: &PoiAccessLog) -> Result<PoiAccessLog, DomainError> {
        let row: AccessLogRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO poi_access_logs ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {cols}
            "#,
            cols = LOG_COLUMNS
        ))
        .bind(log.id)
        .bind(log.poi_id)
        .bind(log.organization_id)
        .bind(&log.platform_type)
        .bind(log.user_id)
        .bind(&log.access_type)
        .bind(log.accessed_at)
        .bind(&log.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating access log"))?;

        Ok(row.into())
    }

    async fn update(&self, log: &PoiAccessLog) -> Result<PoiAccessLog, DomainError> {
        let row: Option<AccessLogRow> = sqlx::query_as(&format!(
            r#"
            UPDATE poi_access_logs
            SET poi_id = $2, organization_id = $3, platform_type = $4, user_id = $5,
                access_type = $6, accessed_at = $7, metadata = $8
            WHERE id = $1
            RETURNING {}
            "#,
            LOG_COLUMNS
        ))
        .bind(log.id)
        .bind(log.poi_id)
        .bind(log.organization_id)
        .bind(&log.platform_type)
        .bind(log.user_id)
        .bind(&log.access_type)
        .bind(log.accessed_at)
        .bind(&log.metadata)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating access log"))?;

        row.map(Into::into).ok_or(DomainError::AccessLogNotFound(log.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM poi_access_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting access log"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM poi_access_logs WHERE accessed_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(db_error("purging access logs"))?;

        info!("Purged {} access log rows", result.rows_affected());
        Ok(result.rows_affected())
    }
}
