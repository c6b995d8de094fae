// ============================================================================
// POI Infrastructure - PostgreSQL Platform Statistics Repository
// File: crates/poi-infrastructure/src/database/postgres/platform_stat_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use poi_core::domain::PoiPlatformStat;
use poi_core::error::DomainError;
use poi_core::repositories::PoiPlatformStatRepository;

use super::db_error;

const STAT_COLUMNS: &str =
    "id, organization_id, poi_id, platform_type, stat_date, views, reviews, likes, dislikes";

pub struct PgPoiPlatformStatRepository {
    pool: PgPool,
}

impl PgPoiPlatformStatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PlatformStatRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub poi_id: Option<Uuid>,
    pub platform_type: String,
    pub stat_date: NaiveDate,
    pub views: i32,
    pub reviews: i32,
    pub likes: i32,
    pub dislikes: i32,
}

impl From<PlatformStatRow> for PoiPlatformStat {
    fn from(row: PlatformStatRow) -> Self {
        PoiPlatformStat {
            id: row.id,
            organization_id: row.organization_id,
            poi_id: row.poi_id,
            platform_type: row.platform_type,
            stat_date: row.stat_date,
            views: row.views,
            reviews: row.reviews,
            likes: row.likes,
            dislikes: row.dislikes,
        }
    }
}

#[async_trait]
impl PoiPlatformStatRepository for PgPoiPlatformStatRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiPlatformStat>, DomainError> {
        let row: Option<PlatformStatRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_platform_stats WHERE id = $1",
            STAT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding platform stat by id"))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiPlatformStat>, DomainError> {
        let rows: Vec<PlatformStatRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_platform_stats WHERE organization_id = $1 ORDER BY stat_date DESC, platform_type",
            STAT_COLUMNS
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing platform stats by organization"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_poi(&self, poi_id: &Uuid) -> Result<Vec<PoiPlatformStat>, DomainError> {
        let rows: Vec<PlatformStatRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_platform_stats WHERE poi_id = $1 ORDER BY stat_date DESC, platform_type",
            STAT_COLUMNS
        ))
        .bind(poi_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing platform stats by POI"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_platform(&self, platform_type: &str) -> Result<Vec<PoiPlatformStat>, DomainError> {
        let rows: Vec<PlatformStatRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_platform_stats WHERE platform_type = $1 ORDER BY stat_date DESC, platform_type",
            STAT_COLUMNS
        ))
        .bind(platform_type)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing platform stats by platform"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_date(&self, stat_date: NaiveDate) -> Result<Vec<PoiPlatformStat>, DomainError> {
        let rows: Vec<PlatformStatRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_platform_stats WHERE stat_date = $1 ORDER BY platform_type",
            STAT_COLUMNS
        ))
        .bind(stat_date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing platform stats by date"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_organization_and_date_range(
        &self,
        organization_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PoiPlatformStat>, DomainError> {
        let rows: Vec<PlatformStatRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM poi_platform_stats
            WHERE organization_id = $1 AND stat_date BETWEEN $2 AND $3
            ORDER BY stat_date DESC, platform_type
            "#,
            STAT_COLUMNS
        ))
        .bind(organization_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing platform stats by date range"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists(&self, id: &Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM poi_platform_stats WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("checking platform stat existence"))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM poi_platform_stats")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting platform stats"))
    }

    async fn create(&self, stat: &PoiPlatformStat) -> Result<PoiPlatformStat, DomainError> {
        let row: PlatformStatRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO poi_platform_stats ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {cols}
            "#,
            cols = STAT_COLUMNS
        ))
        .bind(stat.id)
        .bind(stat.organization_id)
        .bind(stat.poi_id)
        .bind(&stat.platform_type)
        .bind(stat.stat_date)
        .bind(stat.views)
        .bind(stat.reviews)
        .bind(stat.likes)
        .bind(stat.dislikes)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating platform stat"))?;

        Ok(row.into())
    }

    async fn update(&self, stat: &PoiPlatformStat) -> Result<PoiPlatformStat, DomainError> {
        let row: Option<PlatformStatRow> = sqlx::query_as(&format!(
            r#"
            UPDATE poi_platform_stats
            SET organization_id = $2, poi_id = $3, platform_type = $4, stat_date = $5,
                views = $6, reviews = $7, likes = $8, dislikes = $9
            WHERE id = $1
            RETURNING {}
            "#,
            STAT_COLUMNS
        ))
        .bind(stat.id)
        .bind(stat.organization_id)
        .bind(stat.poi_id)
        .bind(&stat.platform_type)
        .bind(stat.stat_date)
        .bind(stat.views)
        .bind(stat.reviews)
        .bind(stat.likes)
        .bind(stat.dislikes)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating platform stat"))?;

        row.map(Into::into).ok_or(DomainError::StatNotFound(stat.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM poi_platform_stats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting platform stat"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_organization(&self, organization_id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM poi_platform_stats WHERE organization_id = $1")
            .bind(organization_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting platform stats by organization"))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_poi(&self, poi_id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM poi_platform_stats WHERE poi_id = $1")
            .bind(poi_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting platform stats by POI"))?;

        Ok(result.rows_affected())
    }
}
