// ============================================================================
// POI Infrastructure - PostgreSQL Review Repository
// File: crates/poi-infrastructure/src/database/postgres/review_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use poi_core::domain::{PoiReview, ReviewStats};
use poi_core::error::DomainError;
use poi_core::repositories::PoiReviewRepository;

use super::db_error;

const REVIEW_COLUMNS: &str =
    "id, poi_id, user_id, organization_id, platform_type, rating, review_text, likes, dislikes, created_at";

pub struct PgPoiReviewRepository {
    pool: PgPool,
}

impl PgPoiReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, column: &str, id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_reviews WHERE {} = $1 ORDER BY created_at DESC, id ASC",
            REVIEW_COLUMNS, column
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing reviews"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn bump(&self, column: &str, id: &Uuid) -> Result<Option<PoiReview>, DomainError> {
        let row: Option<ReviewRow> = sqlx::query_as(&format!(
            "UPDATE poi_reviews SET {col} = {col} + 1 WHERE id = $1 RETURNING {}",
            REVIEW_COLUMNS,
            col = column
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("incrementing review counter"))?;

        Ok(row.map(Into::into))
    }
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    pub id: Uuid,
    pub poi_id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub platform_type: String,
    pub rating: i32,
    pub review_text: Option<String>,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for PoiReview {
    fn from(row: ReviewRow) -> Self {
        PoiReview {
            id: row.id,
            poi_id: row.poi_id,
            user_id: row.user_id,
            organization_id: row.organization_id,
            platform_type: row.platform_type,
            rating: row.rating,
            review_text: row.review_text,
            likes: row.likes,
            dislikes: row.dislikes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ReviewStatsRow {
    pub review_count: i64,
    pub average_rating: f64,
    pub total_likes: i64,
    pub total_dislikes: i64,
}

#[async_trait]
impl PoiReviewRepository for PgPoiReviewRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError> {
        let row: Option<ReviewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM poi_reviews WHERE id = $1",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding review by id"))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_poi(&self, poi_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        self.list_where("poi_id", poi_id).await
    }

    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        self.list_where("user_id", user_id).await
    }

    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        self.list_where("organization_id", organization_id).await
    }

    async fn stats_for_poi(&self, poi_id: &Uuid) -> Result<ReviewStats, DomainError> {
        let row: ReviewStatsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS review_count,
                COALESCE(AVG(rating), 0)::FLOAT8 AS average_rating,
                COALESCE(SUM(likes), 0)::BIGINT AS total_likes,
                COALESCE(SUM(dislikes), 0)::BIGINT AS total_dislikes
            FROM poi_reviews
            WHERE poi_id = $1
            "#
        )
        .bind(poi_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("aggregating review stats"))?;

        Ok(ReviewStats {
            review_count: row.review_count,
            average_rating: row.average_rating,
            total_likes: row.total_likes,
            total_dislikes: row.total_dislikes,
        })
    }

    async fn increment_likes(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError> {
        self.bump("likes", id).await
    }

    async fn increment_dislikes(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError> {
        self.bump("dislikes", id).await
    }

    async fn create(&self, review: &PoiReview) -> Result<PoiReview, DomainError> {
        let row: ReviewRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO poi_reviews ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {cols}
            "#,
            cols = REVIEW_COLUMNS
        ))
        .bind(review.id)
        .bind(review.poi_id)
        .bind(review.user_id)
        .bind(review.organization_id)
        .bind(&review.platform_type)
        .bind(review.rating)
        .bind(&review.review_text)
        .bind(review.likes)
        .bind(review.dislikes)
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating review"))?;

        Ok(row.into())
    }

    async fn update(&self, review: &PoiReview) -> Result<PoiReview, DomainError> {
        let row: Option<ReviewRow> = sqlx::query_as(&format!(
            "UPDATE poi_reviews SET rating = $2, review_text = $3 WHERE id = $1 RETURNING {}",
            REVIEW_COLUMNS
        ))
        .bind(review.id)
        .bind(review.rating)
        .bind(&review.review_text)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating review"))?;

        row.map(Into::into).ok_or(DomainError::ReviewNotFound(review.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM poi_reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting review"))?;

        Ok(result.rows_affected() > 0)
    }
}
