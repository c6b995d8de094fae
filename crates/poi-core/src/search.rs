//! Filter composition and ranking for POI queries.
//!
//! These functions are the reference semantics for nearby search,
//! filtered search and top-popular ranking. The in-memory repositories
//! call them directly; the PostgreSQL repository expresses the same rules
//! in SQL.

use std::cmp::Ordering;

use poi_shared::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::PointOfInterest;
use crate::error::DomainError;
use crate::geo::{self, GeoPoint};

/// Optional filters shared by nearby search and filtered search.
///
/// Present filters combine with AND. `poi_type`, `category` and `city`
/// compare ignoring case; `search_term` is a case-insensitive substring of
/// the name or the description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiFilter {
    pub organization_id: Option<Uuid>,
    pub poi_type: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub search_term: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn eq_ignore_case(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|s| s.to_lowercase() == wanted.to_lowercase())
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

impl PoiFilter {
    /// Trims every text filter and drops the blank ones.
    pub fn normalized(self) -> Self {
        Self {
            organization_id: self.organization_id,
            poi_type: non_blank(self.poi_type),
            category: non_blank(self.category),
            city: non_blank(self.city),
            search_term: non_blank(self.search_term),
        }
    }

    /// Filter predicates only; the active flag is checked by the callers.
    pub fn matches(&self, poi: &PointOfInterest) -> bool {
        if let Some(org) = self.organization_id {
            if poi.organization_id != org {
                return false;
            }
        }
        if let Some(poi_type) = &self.poi_type {
            if !eq_ignore_case(Some(&poi.poi_type), poi_type) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !eq_ignore_case(Some(&poi.category), category) {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !eq_ignore_case(poi.city(), city) {
                return false;
            }
        }
        if let Some(term) = &self.search_term {
            if !contains_ignore_case(Some(&poi.name), term)
                && !contains_ignore_case(poi.description.as_deref(), term)
            {
                return false;
            }
        }
        true
    }
}

/// A validated nearby search request.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub filter: PoiFilter,
    pub pagination: Option<Pagination>,
}

impl NearbyQuery {
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> Result<Self, DomainError> {
        let center = GeoPoint::new(latitude, longitude)?;
        geo::validate_radius(radius_km)?;
        Ok(Self {
            center,
            radius_km,
            filter: PoiFilter::default(),
            pagination: None,
        })
    }

    pub fn with_filter(mut self, filter: PoiFilter) -> Self {
        self.filter = filter.normalized();
        self
    }

    pub fn with_pagination(mut self, pagination: Option<Pagination>) -> Self {
        self.pagination = pagination;
        self
    }
}

/// A POI together with its distance from the query center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPoi {
    pub poi: PointOfInterest,
    pub distance_km: f64,
}

pub fn validate_pagination(pagination: Option<Pagination>) -> Result<(), DomainError> {
    match pagination {
        Some(p) if !p.is_valid() => Err(DomainError::ValidationError(
            "page and per_page must be at least 1".to_string(),
        )),
        _ => Ok(()),
    }
}

fn paginate<T>(items: Vec<T>, pagination: Option<Pagination>) -> Vec<T> {
    match pagination {
        Some(p) => p.apply(items),
        None => items,
    }
}

/// Popularity descending, then name ascending.
pub fn by_popularity(a: &PointOfInterest, b: &PointOfInterest) -> Ordering {
    b.popularity_score
        .total_cmp(&a.popularity_score)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Active, located POIs within the radius, nearest first (ties by name).
pub fn rank_nearby<'a>(
    pois: impl IntoIterator<Item = &'a PointOfInterest>,
    query: &NearbyQuery,
) -> Vec<NearbyPoi> {
    let mut hits: Vec<NearbyPoi> = pois
        .into_iter()
        .filter(|poi| poi.is_active && query.filter.matches(poi))
        .filter_map(|poi| {
            let location = poi.location?;
            let distance_km = geo::distance_km(&query.center, &location);
            (distance_km <= query.radius_km).then(|| NearbyPoi {
                poi: poi.clone(),
                distance_km,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.poi.name.cmp(&b.poi.name))
            .then_with(|| a.poi.id.cmp(&b.poi.id))
    });

    paginate(hits, query.pagination)
}

/// Active POIs matching the filter, most popular first.
pub fn rank_by_popularity<'a>(
    pois: impl IntoIterator<Item = &'a PointOfInterest>,
    filter: &PoiFilter,
    pagination: Option<Pagination>,
) -> Vec<PointOfInterest> {
    let mut hits: Vec<PointOfInterest> = pois
        .into_iter()
        .filter(|poi| poi.is_active && filter.matches(poi))
        .cloned()
        .collect();
    hits.sort_by(by_popularity);
    paginate(hits, pagination)
}

/// At most `limit` active POIs by popularity, oldest first on ties.
/// A non-positive limit yields an empty list.
pub fn top_popular<'a>(
    pois: impl IntoIterator<Item = &'a PointOfInterest>,
    limit: i64,
) -> Vec<PointOfInterest> {
    if limit <= 0 {
        return Vec::new();
    }
    let mut hits: Vec<PointOfInterest> = pois
        .into_iter()
        .filter(|poi| poi.is_active)
        .cloned()
        .collect();
    hits.sort_by(|a, b| {
        b.popularity_score
            .total_cmp(&a.popularity_score)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    hits.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, NewPointOfInterest};
    use chrono::Duration;

    fn poi(name: &str, lat: f64, lon: f64, score: f64) -> PointOfInterest {
        PointOfInterest::new(NewPointOfInterest {
            organization_id: Uuid::nil(),
            name: name.to_string(),
            poi_type: "HOTEL".to_string(),
            category: "Lodging".to_string(),
            location: Some(GeoPoint::new(lat, lon).unwrap()),
            address: Address {
                city: Some("Yaoundé".to_string()),
                ..Default::default()
            },
            popularity_score: Some(score),
            ..Default::default()
        })
        .unwrap()
    }

    fn yaounde_fixture() -> Vec<PointOfInterest> {
        vec![
            poi("Musée National", 3.866, 11.516, 40.0),
            poi("Hilton", 3.848, 11.502, 80.0),
        ]
    }

    #[test]
    fn test_nearby_orders_by_distance() {
        let pois = yaounde_fixture();
        let query = NearbyQuery::new(3.848, 11.502, 5.0).unwrap();
        let hits = rank_nearby(&pois, &query);
        let names: Vec<&str> = hits.iter().map(|h| h.poi.name.as_str()).collect();
        assert_eq!(names, vec!["Hilton", "Musée National"]);
        assert!(hits[0].distance_km < 1e-3);
        assert!((hits[1].distance_km - 2.53).abs() < 0.1);
    }

    #[test]
    fn test_nearby_excludes_outside_radius() {
        let pois = yaounde_fixture();
        let query = NearbyQuery::new(3.848, 11.502, 1.0).unwrap();
        let hits = rank_nearby(&pois, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].poi.name, "Hilton");
    }

    #[test]
    fn test_nearby_excludes_inactive_and_unlocated() {
        let mut pois = yaounde_fixture();
        pois[1].deactivate(None, None);
        let mut unlocated = poi("Nowhere", 3.848, 11.502, 10.0);
        unlocated.location = None;
        pois.push(unlocated);

        let query = NearbyQuery::new(3.848, 11.502, 50.0).unwrap();
        let hits = rank_nearby(&pois, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].poi.name, "Musée National");
    }

    #[test]
    fn test_nearby_ties_broken_by_name() {
        let pois = vec![
            poi("b-cafe", 3.8667, 11.5167, 1.0),
            poi("B-cafe", 3.8667, 11.5167, 1.0),
            poi("a-cafe", 3.8667, 11.5167, 1.0),
        ];
        let query = NearbyQuery::new(3.8667, 11.5167, 0.1).unwrap();
        let names: Vec<String> = rank_nearby(&pois, &query)
            .into_iter()
            .map(|h| h.poi.name)
            .collect();
        assert_eq!(names, vec!["B-cafe", "a-cafe", "b-cafe"]);
    }

    #[test]
    fn test_nearby_query_validation() {
        assert!(NearbyQuery::new(91.0, 0.0, 1.0).is_err());
        assert!(NearbyQuery::new(0.0, -181.0, 1.0).is_err());
        assert!(NearbyQuery::new(0.0, 0.0, 0.0).is_err());
        assert!(NearbyQuery::new(0.0, 0.0, -2.0).is_err());
        assert!(NearbyQuery::new(0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_nearby_with_filter_and_pagination() {
        let mut pois = yaounde_fixture();
        pois.push(poi("Hilton Annex", 3.849, 11.502, 5.0));
        let query = NearbyQuery::new(3.848, 11.502, 10.0)
            .unwrap()
            .with_filter(PoiFilter {
                search_term: Some(" hilton ".to_string()),
                ..Default::default()
            })
            .with_pagination(Some(Pagination { page: 2, per_page: 1 }));
        let hits = rank_nearby(&pois, &query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].poi.name, "Hilton Annex");
    }

    #[test]
    fn test_search_without_filters_orders_by_popularity() {
        let mut pois = yaounde_fixture();
        pois.push(poi("Aa Tie", 3.0, 11.0, 40.0));
        let hits = rank_by_popularity(&pois, &PoiFilter::default(), None);
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hilton", "Aa Tie", "Musée National"]);
    }

    #[test]
    fn test_city_filter_ignores_case() {
        let pois = yaounde_fixture();
        for city in ["Yaoundé", "yaoundé", "YAOUNDÉ"] {
            let filter = PoiFilter {
                city: Some(city.to_string()),
                ..Default::default()
            };
            assert_eq!(rank_by_popularity(&pois, &filter, None).len(), 2, "city {}", city);
        }
        let filter = PoiFilter {
            city: Some("Douala".to_string()),
            ..Default::default()
        };
        assert!(rank_by_popularity(&pois, &filter, None).is_empty());
    }

    #[test]
    fn test_search_term_matches_description() {
        let mut pois = yaounde_fixture();
        pois[0].description = Some("Histoire du Cameroun".to_string());
        let filter = PoiFilter {
            search_term: Some("CAMEROUN".to_string()),
            ..Default::default()
        };
        let hits = rank_by_popularity(&pois, &filter, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Musée National");
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut pois = yaounde_fixture();
        let org = Uuid::new_v4();
        pois[1].organization_id = org;
        let filter = PoiFilter {
            organization_id: Some(org),
            poi_type: Some("hotel".to_string()),
            category: Some("MUSEUM".to_string()),
            ..Default::default()
        };
        assert!(rank_by_popularity(&pois, &filter, None).is_empty());
    }

    #[test]
    fn test_blank_filters_are_absent() {
        let filter = PoiFilter {
            poi_type: Some("   ".to_string()),
            city: Some(String::new()),
            ..Default::default()
        }
        .normalized();
        assert!(filter.poi_type.is_none());
        assert!(filter.city.is_none());
    }

    #[test]
    fn test_top_popular_limits() {
        let mut pois: Vec<PointOfInterest> = (0..5)
            .map(|i| poi(&format!("poi-{}", i), 3.8, 11.5, (i * 10) as f64))
            .collect();
        pois[0].deactivate(None, None);

        assert!(top_popular(&pois, 0).is_empty());
        assert!(top_popular(&pois, -1).is_empty());

        let top: Vec<f64> = top_popular(&pois, 3).iter().map(|p| p.popularity_score).collect();
        assert_eq!(top, vec![40.0, 30.0, 20.0]);
        assert_eq!(top_popular(&pois, 50).len(), 4);
    }

    #[test]
    fn test_top_popular_ties_oldest_first() {
        let mut older = poi("zeta", 3.8, 11.5, 50.0);
        older.created_at -= Duration::hours(1);
        let newer = poi("alpha", 3.8, 11.5, 50.0);
        let top = top_popular([&newer, &older], 1);
        assert_eq!(top[0].name, "zeta");
    }

    #[test]
    fn test_invalid_pagination_rejected() {
        assert!(validate_pagination(Some(Pagination { page: 0, per_page: 5 })).is_err());
        assert!(validate_pagination(Some(Pagination { page: 1, per_page: 0 })).is_err());
        assert!(validate_pagination(None).is_ok());
    }
}
