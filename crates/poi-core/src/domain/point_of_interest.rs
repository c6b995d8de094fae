// ============================================================================
// POI Core - Point of Interest Entity
// File: crates/poi-core/src/domain/point_of_interest.rs
// Description: The searchable place entity and its lifecycle transitions
// ============================================================================

use chrono::{DateTime, Utc};
use poi_shared::constants::{MAX_POPULARITY_SCORE, MIN_POPULARITY_SCORE};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;
use crate::geo::GeoPoint;

/// Structured postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub informal_address: Option<String>,
}

/// A contact person attached to a POI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactPerson {
    #[validate(length(min = 1, max = 255, message = "Contact name is required"))]
    pub name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid contact email"))]
    pub email: Option<String>,
}

/// Point of Interest entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PointOfInterest {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub town_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Type must be between 1 and 100 characters"))]
    pub poi_type: String,

    #[validate(length(min = 1, max = 100, message = "Category must be between 1 and 100 characters"))]
    pub category: String,

    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub friendly_name: Option<String>,

    #[validate(length(max = 5000, message = "Description too long"))]
    pub description: Option<String>,

    pub location: Option<GeoPoint>,
    pub address: Address,

    pub phone_number: Option<String>,
    pub website_url: Option<String>,

    pub image_urls: Vec<String>,
    pub amenities: Vec<String>,
    pub keywords: Vec<String>,
    pub type_tags: Vec<String>,

    pub operation_time_plan: Option<JsonValue>,

    #[validate(nested)]
    pub contacts: Vec<ContactPerson>,

    pub popularity_score: f64,
    pub is_active: bool,
    pub deactivation_reason: Option<String>,

    // Audit
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub deactivated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a POI
#[derive(Debug, Clone, Default)]
pub struct NewPointOfInterest {
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
    pub location: Option<GeoPoint>,
    pub address: Address,
    pub phone_number: Option<String>,
    pub website_url: Option<String>,
    pub image_urls: Vec<String>,
    pub amenities: Vec<String>,
    pub keywords: Vec<String>,
    pub type_tags: Vec<String>,
    pub operation_time_plan: Option<JsonValue>,
    pub contacts: Vec<ContactPerson>,
    pub popularity_score: Option<f64>,
}

/// Partial update: only `Some` fields overwrite the stored entity
#[derive(Debug, Clone, Default)]
pub struct PoiChanges {
    pub updated_by: Option<Uuid>,
    pub town_id: Option<Uuid>,
    pub name: Option<String>,
    pub poi_type: Option<String>,
    pub category: Option<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub friendly_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<GeoPoint>,
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

pub fn validate_popularity_score(score: f64) -> Result<(), DomainError> {
    if !score.is_finite() || !(MIN_POPULARITY_SCORE..=MAX_POPULARITY_SCORE).contains(&score) {
        return Err(DomainError::ValidationError(format!(
            "popularity score must be within [{}, {}], got {}",
            MIN_POPULARITY_SCORE, MAX_POPULARITY_SCORE, score
        )));
    }
    Ok(())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl PointOfInterest {
    pub fn new(input: NewPointOfInterest) -> Result<Self, DomainError> {
        let popularity_score = input.popularity_score.unwrap_or(MIN_POPULARITY_SCORE);
        validate_popularity_score(popularity_score)?;

        let now = Utc::now();
        let poi = Self {
            id: Uuid::new_v4(),
            organization_id: input.organization_id,
            town_id: input.town_id,
            name: input.name.trim().to_string(),
            poi_type: input.poi_type.trim().to_string(),
            category: input.category.trim().to_string(),
            long_name: trimmed(input.long_name),
            short_name: trimmed(input.short_name),
            friendly_name: trimmed(input.friendly_name),
            description: trimmed(input.description),
            location: input.location,
            address: input.address,
            phone_number: trimmed(input.phone_number),
            website_url: trimmed(input.website_url),
            image_urls: input.image_urls,
            amenities: input.amenities,
            keywords: input.keywords,
            type_tags: input.type_tags,
            operation_time_plan: input.operation_time_plan,
            contacts: input.contacts,
            popularity_score,
            is_active: true,
            deactivation_reason: None,
            created_by: input.created_by,
            updated_by: None,
            deactivated_by: None,
            created_at: now,
            updated_at: now,
        };

        poi.validate()?;
        Ok(poi)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|l| l.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|l| l.longitude)
    }

    pub fn city(&self) -> Option<&str> {
        self.address.city.as_deref()
    }

    pub fn apply_changes(&mut self, changes: PoiChanges) -> Result<(), DomainError> {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(poi_type) = changes.poi_type {
            self.poi_type = poi_type.trim().to_string();
        }
        if let Some(category) = changes.category {
            self.category = category.trim().to_string();
        }
        if changes.town_id.is_some() {
            self.town_id = changes.town_id;
        }
        if changes.long_name.is_some() {
            self.long_name = trimmed(changes.long_name);
        }
        if changes.short_name.is_some() {
            self.short_name = trimmed(changes.short_name);
        }
        if changes.friendly_name.is_some() {
            self.friendly_name = trimmed(changes.friendly_name);
        }
        if changes.description.is_some() {
            self.description = trimmed(changes.description);
        }
        if changes.location.is_some() {
            self.location = changes.location;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
        if changes.phone_number.is_some() {
            self.phone_number = trimmed(changes.phone_number);
        }
        if changes.website_url.is_some() {
            self.website_url = trimmed(changes.website_url);
        }
        if let Some(image_urls) = changes.image_urls {
            self.image_urls = image_urls;
        }
        if let Some(amenities) = changes.amenities {
            self.amenities = amenities;
        }
        if let Some(keywords) = changes.keywords {
            self.keywords = keywords;
        }
        if let Some(type_tags) = changes.type_tags {
            self.type_tags = type_tags;
        }
        if changes.operation_time_plan.is_some() {
            self.operation_time_plan = changes.operation_time_plan;
        }
        if let Some(contacts) = changes.contacts {
            self.contacts = contacts;
        }

        self.validate()?;
        self.touch(changes.updated_by);
        Ok(())
    }

    pub fn activate(&mut self, activated_by: Option<Uuid>) {
        self.is_active = true;
        self.deactivation_reason = None;
        self.deactivated_by = None;
        self.touch(activated_by);
    }

    pub fn deactivate(&mut self, reason: Option<String>, deactivated_by: Option<Uuid>) {
        self.is_active = false;
        self.deactivation_reason = trimmed(reason);
        self.deactivated_by = deactivated_by;
        self.touch(deactivated_by);
    }

    pub fn set_popularity_score(&mut self, score: f64) -> Result<(), DomainError> {
        validate_popularity_score(score)?;
        self.popularity_score = score;
        self.touch(None);
        Ok(())
    }

    /// Advances `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self, updated_by: Option<Uuid>) {
        self.updated_at = Utc::now().max(self.created_at);
        if updated_by.is_some() {
            self.updated_by = updated_by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_input() -> NewPointOfInterest {
        NewPointOfInterest {
            organization_id: Uuid::new_v4(),
            name: "  Hotel Hilton ".to_string(),
            poi_type: "HOTEL".to_string(),
            category: "Lodging".to_string(),
            location: Some(GeoPoint::new(3.848, 11.502).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_poi_defaults() {
        let poi = PointOfInterest::new(new_input()).unwrap();
        assert_eq!(poi.name, "Hotel Hilton");
        assert!(poi.is_active);
        assert_eq!(poi.popularity_score, 0.0);
        assert_eq!(poi.created_at, poi.updated_at);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut input = new_input();
        input.name = "   ".to_string();
        assert!(matches!(
            PointOfInterest::new(input),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn test_create_rejects_out_of_range_score() {
        let mut input = new_input();
        input.popularity_score = Some(100.5);
        assert!(PointOfInterest::new(input).is_err());
    }

    #[test]
    fn test_apply_changes_only_overwrites_given_fields() {
        let mut poi = PointOfInterest::new(new_input()).unwrap();
        let before = poi.clone();
        poi.apply_changes(PoiChanges {
            description: Some("Five stars".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(poi.description.as_deref(), Some("Five stars"));
        assert_eq!(poi.name, before.name);
        assert_eq!(poi.location, before.location);
        assert!(poi.updated_at >= poi.created_at);
    }

    #[test]
    fn test_deactivate_then_activate() {
        let mut poi = PointOfInterest::new(new_input()).unwrap();
        let actor = Uuid::new_v4();
        poi.deactivate(Some("closed for works".to_string()), Some(actor));
        assert!(!poi.is_active);
        assert_eq!(poi.deactivated_by, Some(actor));
        assert_eq!(poi.deactivation_reason.as_deref(), Some("closed for works"));

        poi.activate(None);
        assert!(poi.is_active);
        assert!(poi.deactivation_reason.is_none());
    }

    #[test]
    fn test_set_popularity_score_bounds() {
        let mut poi = PointOfInterest::new(new_input()).unwrap();
        assert!(poi.set_popularity_score(100.0).is_ok());
        assert!(poi.set_popularity_score(0.0).is_ok());
        assert!(poi.set_popularity_score(150.0).is_err());
        assert!(poi.set_popularity_score(-1.0).is_err());
        assert!(poi.set_popularity_score(f64::NAN).is_err());
        assert_eq!(poi.popularity_score, 0.0);
    }
}
