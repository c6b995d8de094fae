// ============================================================================
// POI Infrastructure - PostgreSQL Point of Interest Repository
// File: crates/poi-infrastructure/src/database/postgres/poi_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{types::Json, FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};
use uuid::Uuid;

use poi_core::domain::{Address, ContactPerson, PointOfInterest};
use poi_core::error::DomainError;
use poi_core::geo::GeoPoint;
use poi_core::repositories::PoiRepository;
use poi_core::search::{NearbyPoi, NearbyQuery, PoiFilter};
use poi_shared::constants::EARTH_RADIUS_KM;
use poi_shared::Pagination;

use super::db_error;

const POI_COLUMNS: &str = r#"
    id, organization_id, town_id, created_by, updated_by, deactivated_by, deactivation_reason,
    name, poi_type, category, long_name, short_name, friendly_name, description,
    latitude, longitude,
    street_number, street_name, city, state_province, postal_code, country, informal_address,
    phone_number, website_url, image_urls, amenities, keywords, type_tags,
    operation_time_plan, contacts, popularity_score, is_active, created_at, updated_at
"#;

pub struct PgPoiRepository {
    pool: PgPool,
}

impl PgPoiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct PoiRow {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub town_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub deactivated_by: Option<Uuid>,
    pub deactivation_reason: Option<String>,
    pub name: String,
    pub poi_type: String,
    pub category: String,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub informal_address: Option<String>,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    pub image_urls: Vec<String>,
    pub amenities: Vec<String>,
    pub keywords: Vec<String>,
    pub type_tags: Vec<String>,
    pub operation_time_plan: Option<JsonValue>,
    pub contacts: Json<Vec<ContactPerson>>,
    pub popularity_score: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct NearbyRow {
    #[sqlx(flatten)]
    pub poi: PoiRow,
    pub distance_km: f64,
}

impl From<PoiRow> for PointOfInterest {
    fn from(row: PoiRow) -> Self {
        // The schema keeps latitude and longitude jointly null
        let location = match (row.latitude, row.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
            _ => None,
        };

        PointOfInterest {
            id: row.id,
            organization_id: row.organization_id,
            town_id: row.town_id,
            name: row.name,
            poi_type: row.poi_type,
            category: row.category,
            long_name: row.long_name,
            short_name: row.short_name,
            friendly_name: row.friendly_name,
            description: row.description,
            location,
            address: Address {
                street_number: row.street_number,
                street_name: row.street_name,
                city: row.city,
                state_province: row.state_province,
                postal_code: row.postal_code,
                country: row.country,
                informal_address: row.informal_address,
            },
            phone_number: row.phone_number,
            website_url: row.website_url,
            image_urls: row.image_urls,
            amenities: row.amenities,
            keywords: row.keywords,
            type_tags: row.type_tags,
            operation_time_plan: row.operation_time_plan,
            contacts: row.contacts.0,
            popularity_score: row.popularity_score,
            is_active: row.is_active,
            deactivation_reason: row.deactivation_reason,
            created_by: row.created_by,
            updated_by: row.updated_by,
            deactivated_by: row.deactivated_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<NearbyRow> for NearbyPoi {
    fn from(row: NearbyRow) -> Self {
        NearbyPoi {
            poi: row.poi.into(),
            distance_km: row.distance_km,
        }
    }
}

/// Appends ` AND ...` clauses for every present filter.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &PoiFilter) {
    if let Some(organization_id) = filter.organization_id {
        builder.push(" AND organization_id = ").push_bind(organization_id);
    }
    if let Some(poi_type) = &filter.poi_type {
        builder
            .push(" AND LOWER(poi_type) = LOWER(")
            .push_bind(poi_type.clone())
            .push(")");
    }
    if let Some(category) = &filter.category {
        builder
            .push(" AND LOWER(category) = LOWER(")
            .push_bind(category.clone())
            .push(")");
    }
    if let Some(city) = &filter.city {
        builder
            .push(" AND LOWER(city) = LOWER(")
            .push_bind(city.clone())
            .push(")");
    }
    if let Some(term) = &filter.search_term {
        // STRPOS avoids LIKE wildcards in user input
        builder
            .push(" AND (STRPOS(LOWER(name), LOWER(")
            .push_bind(term.clone())
            .push(")) > 0 OR STRPOS(LOWER(COALESCE(description, '')), LOWER(")
            .push_bind(term.clone())
            .push(")) > 0)");
    }
}

fn push_pagination(builder: &mut QueryBuilder<'_, Postgres>, pagination: Option<Pagination>) {
    if let Some(p) = pagination {
        builder
            .push(" LIMIT ")
            .push_bind(p.limit() as i64)
            .push(" OFFSET ")
            .push_bind(p.offset() as i64);
    }
}

fn nearby_query(query: &NearbyQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT * FROM (SELECT {}, (", POI_COLUMNS));
    builder
        .push_bind(EARTH_RADIUS_KM)
        .push(" * ACOS(LEAST(1.0, GREATEST(-1.0, COS(RADIANS(")
        .push_bind(query.center.latitude)
        .push(")) * COS(RADIANS(latitude)) * COS(RADIANS(longitude) - RADIANS(")
        .push_bind(query.center.longitude)
        .push(")) + SIN(RADIANS(")
        .push_bind(query.center.latitude)
        .push(")) * SIN(RADIANS(latitude)))))) AS distance_km FROM points_of_interest")
        .push(" WHERE is_active = TRUE AND latitude IS NOT NULL AND longitude IS NOT NULL");
    push_filter(&mut builder, &query.filter);
    builder
        .push(") AS candidates WHERE distance_km <= ")
        .push_bind(query.radius_km)
        .push(r#" ORDER BY distance_km ASC, name COLLATE "C" ASC, id ASC"#);
    push_pagination(&mut builder, query.pagination);
    builder
}

fn search_query(filter: &PoiFilter, pagination: Option<Pagination>) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM points_of_interest WHERE is_active = TRUE",
        POI_COLUMNS
    ));
    push_filter(&mut builder, filter);
    builder.push(r#" ORDER BY popularity_score DESC, name COLLATE "C" ASC, id ASC"#);
    push_pagination(&mut builder, pagination);
    builder
}

#[async_trait]
impl PoiRepository for PgPoiRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PointOfInterest>, DomainError> {
        let row: Option<PoiRow> = sqlx::query_as(&format!(
            "SELECT {} FROM points_of_interest WHERE id = $1",
            POI_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding POI by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_all_active(&self) -> Result<Vec<PointOfInterest>, DomainError> {
        let rows: Vec<PoiRow> = sqlx::query_as(&format!(
            r#"SELECT {} FROM points_of_interest WHERE is_active = TRUE ORDER BY name COLLATE "C""#,
            POI_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing active POIs"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PointOfInterest>, DomainError> {
        let rows: Vec<PoiRow> = sqlx::query_as(&format!(
            r#"SELECT {} FROM points_of_interest WHERE organization_id = $1 ORDER BY name COLLATE "C""#,
            POI_COLUMNS
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing POIs by organization"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyPoi>, DomainError> {
        let mut builder = nearby_query(query);
        let rows: Vec<NearbyRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("running nearby search"))?;

        debug!("Nearby search returned {} rows", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn search(
        &self,
        filter: &PoiFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<PointOfInterest>, DomainError> {
        let mut builder = search_query(filter, pagination);
        let rows: Vec<PoiRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("running filtered search"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_top_popular(&self, limit: i64) -> Result<Vec<PointOfInterest>, DomainError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let rows: Vec<PoiRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM points_of_interest
            WHERE is_active = TRUE
            ORDER BY popularity_score DESC, created_at ASC, id ASC
            LIMIT $1
            "#,
            POI_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("finding top popular POIs"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_popularity_score(
        &self,
        id: &Uuid,
        score: f64,
    ) -> Result<Option<PointOfInterest>, DomainError> {
        let row: Option<PoiRow> = sqlx::query_as(&format!(
            r#"
            UPDATE points_of_interest
            SET popularity_score = $2, updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING {}
            "#,
            POI_COLUMNS
        ))
        .bind(id)
        .bind(score)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating popularity score"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, poi: &PointOfInterest) -> Result<PointOfInterest, DomainError> {
        info!("Creating POI: {}", poi.name);

        let row: PoiRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO points_of_interest (
                id, organization_id, town_id, created_by, updated_by, deactivated_by, deactivation_reason,
                name, poi_type, category, long_name, short_name, friendly_name, description,
                latitude, longitude,
                street_number, street_name, city, state_province, postal_code, country, informal_address,
                phone_number, website_url, image_urls, amenities, keywords, type_tags,
                operation_time_plan, contacts, popularity_score, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                    $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, $33, $34, $35)
            RETURNING {}
            "#,
            POI_COLUMNS
        ))
        .bind(poi.id)
        .bind(poi.organization_id)
        .bind(poi.town_id)
        .bind(poi.created_by)
        .bind(poi.updated_by)
        .bind(poi.deactivated_by)
        .bind(&poi.deactivation_reason)
        .bind(&poi.name)
        .bind(&poi.poi_type)
        .bind(&poi.category)
        .bind(&poi.long_name)
        .bind(&poi.short_name)
        .bind(&poi.friendly_name)
        .bind(&poi.description)
        .bind(poi.latitude())
        .bind(poi.longitude())
        .bind(&poi.address.street_number)
        .bind(&poi.address.street_name)
        .bind(&poi.address.city)
        .bind(&poi.address.state_province)
        .bind(&poi.address.postal_code)
        .bind(&poi.address.country)
        .bind(&poi.address.informal_address)
        .bind(&poi.phone_number)
        .bind(&poi.website_url)
        .bind(&poi.image_urls)
        .bind(&poi.amenities)
        .bind(&poi.keywords)
        .bind(&poi.type_tags)
        .bind(&poi.operation_time_plan)
        .bind(Json(&poi.contacts))
        .bind(poi.popularity_score)
        .bind(poi.is_active)
        .bind(poi.created_at)
        .bind(poi.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating POI"))?;

        info!("POI created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, poi: &PointOfInterest) -> Result<PointOfInterest, DomainError> {
        let row: Option<PoiRow> = sqlx::query_as(&format!(
            r#"
            UPDATE points_of_interest
            SET
                town_id = $2, updated_by = $3, deactivated_by = $4, deactivation_reason = $5,
                name = $6, poi_type = $7, category = $8,
                long_name = $9, short_name = $10, friendly_name = $11, description = $12,
                latitude = $13, longitude = $14,
                street_number = $15, street_name = $16, city = $17, state_province = $18,
                postal_code = $19, country = $20, informal_address = $21,
                phone_number = $22, website_url = $23,
                image_urls = $24, amenities = $25, keywords = $26, type_tags = $27,
                operation_time_plan = $28, contacts = $29,
                popularity_score = $30, is_active = $31, updated_at = $32
            WHERE id = $1
            RETURNING {}
            "#,
            POI_COLUMNS
        ))
        .bind(poi.id)
        .bind(poi.town_id)
        .bind(poi.updated_by)
        .bind(poi.deactivated_by)
        .bind(&poi.deactivation_reason)
        .bind(&poi.name)
        .bind(&poi.poi_type)
        .bind(&poi.category)
        .bind(&poi.long_name)
        .bind(&poi.short_name)
        .bind(&poi.friendly_name)
        .bind(&poi.description)
        .bind(poi.latitude())
        .bind(poi.longitude())
        .bind(&poi.address.street_number)
        .bind(&poi.address.street_name)
        .bind(&poi.address.city)
        .bind(&poi.address.state_province)
        .bind(&poi.address.postal_code)
        .bind(&poi.address.country)
        .bind(&poi.address.informal_address)
        .bind(&poi.phone_number)
        .bind(&poi.website_url)
        .bind(&poi.image_urls)
        .bind(&poi.amenities)
        .bind(&poi.keywords)
        .bind(&poi.type_tags)
        .bind(&poi.operation_time_plan)
        .bind(Json(&poi.contacts))
        .bind(poi.popularity_score)
        .bind(poi.is_active)
        .bind(poi.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating POI"))?;

        row.map(Into::into).ok_or(DomainError::PoiNotFound(poi.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM points_of_interest WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting POI"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_search_without_filters() {
        let builder = search_query(&PoiFilter::default(), None);
        let sql = compact(builder.sql());
        assert!(sql.ends_with(
            r#"FROM points_of_interest WHERE is_active = TRUE ORDER BY popularity_score DESC, name COLLATE "C" ASC, id ASC"#
        ));
    }

    #[test]
    fn test_search_with_all_filters() {
        let filter = PoiFilter {
            organization_id: Some(Uuid::nil()),
            poi_type: Some("HOTEL".to_string()),
            category: Some("Lodging".to_string()),
            city: Some("Yaoundé".to_string()),
            search_term: Some("hil".to_string()),
        };
        let builder = search_query(&filter, Some(Pagination { page: 2, per_page: 10 }));
        let sql = compact(builder.sql());
        assert!(sql.contains("AND organization_id = $1"));
        assert!(sql.contains("AND LOWER(poi_type) = LOWER($2)"));
        assert!(sql.contains("AND LOWER(category) = LOWER($3)"));
        assert!(sql.contains("AND LOWER(city) = LOWER($4)"));
        assert!(sql.contains(
            "AND (STRPOS(LOWER(name), LOWER($5)) > 0 OR STRPOS(LOWER(COALESCE(description, '')), LOWER($6)) > 0)"
        ));
        assert!(sql.ends_with("LIMIT $7 OFFSET $8"));
    }

    #[test]
    fn test_nearby_query_shape() {
        let query = NearbyQuery::new(3.848, 11.502, 5.0)
            .unwrap()
            .with_filter(PoiFilter {
                city: Some("yaoundé".to_string()),
                ..Default::default()
            });
        let builder = nearby_query(&query);
        let sql = compact(builder.sql());
        assert!(sql.contains("ACOS(LEAST(1.0, GREATEST(-1.0,"));
        assert!(sql.contains("WHERE is_active = TRUE AND latitude IS NOT NULL AND longitude IS NOT NULL"));
        assert!(sql.contains("AND LOWER(city) = LOWER($5)"));
        assert!(sql.contains("WHERE distance_km <= $6"));
        assert!(sql.ends_with(r#"ORDER BY distance_km ASC, name COLLATE "C" ASC, id ASC"#));
    }
}
