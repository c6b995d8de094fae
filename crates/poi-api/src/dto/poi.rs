// ============================================================================
// POI API - Point of Interest DTOs
// File: crates/poi-api/src/dto/poi.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use poi_core::domain::{Address, ContactPerson, NewPointOfInterest, PoiChanges, PointOfInterest};
use poi_core::error::DomainError;
use poi_core::geo::GeoPoint;
use poi_core::search::{NearbyPoi, PoiFilter};
use poi_shared::Pagination;

/// Query of `GET /pois/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub organization_id: Option<Uuid>,
    pub poi_type: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub search_term: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchParams {
    pub fn into_parts(self) -> (PoiFilter, Option<Pagination>) {
        let pagination = Pagination::from_params(self.page, self.per_page);
        let filter = PoiFilter {
            organization_id: self.organization_id,
            poi_type: self.poi_type,
            category: self.category,
            city: self.city,
            search_term: self.search_term,
        };
        (filter, pagination)
    }
}

/// Query of `GET /pois/nearby`. The filter fields mirror [`SearchParams`].
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
    pub organization_id: Option<Uuid>,
    pub poi_type: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub search_term: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl NearbyParams {
    pub fn filter(&self) -> PoiFilter {
        PoiFilter {
            organization_id: self.organization_id,
            poi_type: self.poi_type.clone(),
            category: self.category.clone(),
            city: self.city.clone(),
            search_term: self.search_term.clone(),
        }
    }

    pub fn pagination(&self) -> Option<Pagination> {
        Pagination::from_params(self.page, self.per_page)
    }
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PopularityUpdateRequest {
    pub score: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivateRequest {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeactivateRequest {
    pub reason: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePoiRequest {
    pub organization_id: Uuid,
    pub town_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub name: String,
    pub poi_type: String,
    pub category: String,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub address: Address,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub type_tags: Vec<String>,
    pub operation_time_plan: Option<JsonValue>,
    #[serde(default)]
    pub contacts: Vec<ContactPerson>,
    pub popularity_score: Option<f64>,
}

impl TryFrom<CreatePoiRequest> for NewPointOfInterest {
    type Error = DomainError;

    fn try_from(req: CreatePoiRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            organization_id: req.organization_id,
            town_id: req.town_id,
            created_by: req.created_by,
            name: req.name,
            poi_type: req.poi_type,
            category: req.category,
            long_name: req.long_name,
            short_name: req.short_name,
            friendly_name: req.friendly_name,
            description: req.description,
            location: GeoPoint::from_parts(req.latitude, req.longitude)?,
            address: req.address,
            phone_number: req.phone_number,
            website_url: req.website_url,
            image_urls: req.image_urls,
            amenities: req.amenities,
            keywords: req.keywords,
            type_tags: req.type_tags,
            operation_time_plan: req.operation_time_plan,
            contacts: req.contacts,
            popularity_score: req.popularity_score,
        })
    }
}

/// Partial update. An address, when given, replaces the stored one.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePoiRequest {
    pub updated_by: Option<Uuid>,
    pub town_id: Option<Uuid>,
    pub name: Option<String>,
    pub poi_type: Option<String>,
    pub category: Option<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<Address>,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
    pub type_tags: Option<Vec<String>>,
    pub operation_time_plan: Option<JsonValue>,
    pub contacts: Option<Vec<ContactPerson>>,
}

impl TryFrom<UpdatePoiRequest> for PoiChanges {
    type Error = DomainError;

    fn try_from(req: UpdatePoiRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            updated_by: req.updated_by,
            town_id: req.town_id,
            name: req.name,
            poi_type: req.poi_type,
            category: req.category,
            long_name: req.long_name,
            short_name: req.short_name,
            friendly_name: req.friendly_name,
            description: req.description,
            location: GeoPoint::from_parts(req.latitude, req.longitude)?,
            address: req.address,
            phone_number: req.phone_number,
            website_url: req.website_url,
            image_urls: req.image_urls,
            amenities: req.amenities,
            keywords: req.keywords,
            type_tags: req.type_tags,
            operation_time_plan: req.operation_time_plan,
            contacts: req.contacts,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PoiResponse {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub town_id: Option<Uuid>,
    pub name: String,
    pub poi_type: String,
    pub category: String,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(flatten)]
    pub address: Address,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    pub image_urls: Vec<String>,
    pub amenities: Vec<String>,
    pub keywords: Vec<String>,
    pub type_tags: Vec<String>,
    pub operation_time_plan: Option<JsonValue>,
    pub contacts: Vec<ContactPerson>,
    pub popularity_score: f64,
    pub is_active: bool,
    pub deactivation_reason: Option<String>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub deactivated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PointOfInterest> for PoiResponse {
    fn from(poi: PointOfInterest) -> Self {
        Self {
            latitude: poi.latitude(),
            longitude: poi.longitude(),
            id: poi.id,
            organization_id: poi.organization_id,
            town_id: poi.town_id,
            name: poi.name,
            poi_type: poi.poi_type,
            category: poi.category,
            long_name: poi.long_name,
            short_name: poi.short_name,
            friendly_name: poi.friendly_name,
            description: poi.description,
            address: poi.address,
            phone_number: poi.phone_number,
            website_url: poi.website_url,
            image_urls: poi.image_urls,
            amenities: poi.amenities,
            keywords: poi.keywords,
            type_tags: poi.type_tags,
            operation_time_plan: poi.operation_time_plan,
            contacts: poi.contacts,
            popularity_score: poi.popularity_score,
            is_active: poi.is_active,
            deactivation_reason: poi.deactivation_reason,
            created_by: poi.created_by,
            updated_by: poi.updated_by,
            deactivated_by: poi.deactivated_by,
            created_at: poi.created_at,
            updated_at: poi.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NearbyPoiResponse {
    #[serde(flatten)]
    pub poi: PoiResponse,
    pub distance_km: f64,
}

impl From<NearbyPoi> for NearbyPoiResponse {
    fn from(nearby: NearbyPoi) -> Self {
        Self {
            poi: nearby.poi.into(),
            distance_km: nearby.distance_km,
        }
    }
}
