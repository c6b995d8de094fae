// ============================================================================
// POI Core - Point of Interest Service
// File: crates/poi-core/src/services/poi_service.rs
// ============================================================================
//! Geospatial search, popularity ranking, and POI lifecycle

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use poi_shared::Pagination;

use crate::domain::{validate_popularity_score, NewPointOfInterest, PoiChanges, PointOfInterest};
use crate::error::DomainError;
use crate::repositories::{AppUserRepository, OrganizationRepository, PoiRepository};
use crate::search::{validate_pagination, NearbyPoi, NearbyQuery, PoiFilter};

pub struct PoiService {
    poi_repo: Arc<dyn PoiRepository>,
    org_repo: Arc<dyn OrganizationRepository>,
    user_repo: Arc<dyn AppUserRepository>,
}

impl PoiService {
    pub fn new(
        poi_repo: Arc<dyn PoiRepository>,
        org_repo: Arc<dyn OrganizationRepository>,
        user_repo: Arc<dyn AppUserRepository>,
    ) -> Self {
        Self {
            poi_repo,
            org_repo,
            user_repo,
        }
    }

    /// Active located POIs within the query radius, nearest first
    pub async fn find_nearby(&self, query: NearbyQuery) -> Result<Vec<NearbyPoi>, DomainError> {
        validate_pagination(query.pagination)?;
        debug!(
            "Nearby search at ({}, {}) within {} km",
            query.center.latitude, query.center.longitude, query.radius_km
        );
        self.poi_repo.find_nearby(&query).await
    }

    /// Active POIs matching every given filter, most popular first
    pub async fn search_with_filters(
        &self,
        filter: PoiFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<PointOfInterest>, DomainError> {
        validate_pagination(pagination)?;
        let filter = filter.normalized();
        debug!("Filtered search: {:?}", filter);
        self.poi_repo.search(&filter, pagination).await
    }

    pub async fn find_top_popular(&self, limit: i64) -> Result<Vec<PointOfInterest>, DomainError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        self.poi_repo.find_top_popular(limit).await
    }

    pub async fn update_popularity_score(
        &self,
        id: &Uuid,
        score: f64,
    ) -> Result<PointOfInterest, DomainError> {
        if let Err(e) = validate_popularity_score(score) {
            warn!("Rejected popularity score {} for POI {}", score, id);
            return Err(e);
        }

        let poi = self
            .poi_repo
            .update_popularity_score(id, score)
            .await?
            .ok_or(DomainError::PoiNotFound(*id))?;

        info!("Popularity score of POI {} set to {}", id, score);
        Ok(poi)
    }

    pub async fn create(&self, input: NewPointOfInterest) -> Result<PointOfInterest, DomainError> {
        let organization_id = input.organization_id;
        if self.org_repo.find_by_id(&organization_id).await?.is_none() {
            warn!("POI creation failed: unknown organization {}", organization_id);
            return Err(DomainError::OrganizationNotFound(organization_id));
        }
        if let Some(user_id) = input.created_by {
            if self.user_repo.find_by_id(&user_id).await?.is_none() {
                return Err(DomainError::UserNotFound(user_id));
            }
        }

        let poi = PointOfInterest::new(input)?;
        let created = self.poi_repo.create(&poi).await?;

        info!("POI created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<PointOfInterest, DomainError> {
        self.poi_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PoiNotFound(*id))
    }

    pub async fn list_active(&self) -> Result<Vec<PointOfInterest>, DomainError> {
        self.poi_repo.find_all_active().await
    }

    pub async fn list_by_organization(
        &self,
        organization_id: &Uuid,
    ) -> Result<Vec<PointOfInterest>, DomainError> {
        self.poi_repo.find_by_organization(organization_id).await
    }

    /// Partial update; only the provided fields change
    pub async fn update(&self, id: &Uuid, changes: PoiChanges) -> Result<PointOfInterest, DomainError> {
        let mut poi = self.get(id).await?;
        poi.apply_changes(changes)?;
        let updated = self.poi_repo.update(&poi).await?;

        info!("POI updated: {}", id);
        Ok(updated)
    }

    pub async fn activate(&self, id: &Uuid, user_id: Option<Uuid>) -> Result<PointOfInterest, DomainError> {
        let mut poi = self.get(id).await?;
        poi.activate(user_id);
        let updated = self.poi_repo.update(&poi).await?;

        info!("POI activated: {}", id);
        Ok(updated)
    }

    pub async fn deactivate(
        &self,
        id: &Uuid,
        reason: Option<String>,
        user_id: Option<Uuid>,
    ) -> Result<PointOfInterest, DomainError> {
        let mut poi = self.get(id).await?;
        poi.deactivate(reason, user_id);
        let updated = self.poi_repo.update(&poi).await?;

        info!("POI deactivated: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        if !self.poi_repo.delete(id).await? {
            return Err(DomainError::PoiNotFound(*id));
        }
        info!("POI deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Organization};
    use crate::geo::GeoPoint;
    use crate::repositories::memory::{
        InMemoryAppUserRepository, InMemoryOrganizationRepository, InMemoryPoiRepository,
    };
    use crate::repositories::MockPoiRepository;

    struct Fixture {
        service: PoiService,
        org_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let orgs = Arc::new(InMemoryOrganizationRepository::new());
        let org = Organization::new("Yow Point".to_string(), Some("yp".to_string()), None).unwrap();
        orgs.create(&org).await.unwrap();

        Fixture {
            service: PoiService::new(
                Arc::new(InMemoryPoiRepository::new()),
                orgs,
                Arc::new(InMemoryAppUserRepository::new()),
            ),
            org_id: org.id,
        }
    }

    fn located(org_id: Uuid, name: &str, lat: f64, lon: f64, score: f64) -> NewPointOfInterest {
        NewPointOfInterest {
            organization_id: org_id,
            name: name.to_string(),
            poi_type: "LANDMARK".to_string(),
            category: "Tourism".to_string(),
            location: Some(GeoPoint::new(lat, lon).unwrap()),
            address: Address {
                city: Some("Yaoundé".to_string()),
                ..Default::default()
            },
            popularity_score: Some(score),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_yaounde_scenario() {
        let f = fixture().await;
        f.service
            .create(located(f.org_id, "Hilton", 3.848, 11.502, 80.0))
            .await
            .unwrap();
        f.service
            .create(located(f.org_id, "Musée National", 3.866, 11.516, 40.0))
            .await
            .unwrap();

        let nearby = f
            .service
            .find_nearby(NearbyQuery::new(3.848, 11.502, 5.0).unwrap())
            .await
            .unwrap();
        let names: Vec<&str> = nearby.iter().map(|n| n.poi.name.as_str()).collect();
        assert_eq!(names, vec!["Hilton", "Musée National"]);

        let filter = PoiFilter {
            organization_id: Some(f.org_id),
            ..Default::default()
        };
        let searched = f.service.search_with_filters(filter, None).await.unwrap();
        let names: Vec<&str> = searched.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hilton", "Musée National"]);

        let top = f.service.find_top_popular(1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Hilton");
    }

    #[tokio::test]
    async fn test_created_poi_found_at_its_own_location() {
        let f = fixture().await;
        let created = f
            .service
            .create(located(f.org_id, "Marché Central", 3.8667, 11.5167, 10.0))
            .await
            .unwrap();

        let hits = f
            .service
            .find_nearby(NearbyQuery::new(3.8667, 11.5167, 0.1).unwrap())
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].poi.id, created.id);
        assert!(hits[0].distance_km < 1e-3);
    }

    #[tokio::test]
    async fn test_update_popularity_score_out_of_range_leaves_score() {
        let f = fixture().await;
        let poi = f
            .service
            .create(located(f.org_id, "Hilton", 3.848, 11.502, 80.0))
            .await
            .unwrap();

        let result = f.service.update_popularity_score(&poi.id, 150.0).await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
        assert_eq!(f.service.get(&poi.id).await.unwrap().popularity_score, 80.0);

        let updated = f.service.update_popularity_score(&poi.id, 55.5).await.unwrap();
        assert_eq!(updated.popularity_score, 55.5);
        assert!(updated.updated_at >= poi.updated_at);
    }

    #[tokio::test]
    async fn test_update_popularity_score_unknown_id() {
        let f = fixture().await;
        let id = Uuid::new_v4();
        let result = f.service.update_popularity_score(&id, 50.0).await;
        assert_eq!(result.unwrap_err(), DomainError::PoiNotFound(id));
    }

    #[tokio::test]
    async fn test_invalid_score_never_reaches_storage() {
        let mut repo = MockPoiRepository::new();
        repo.expect_update_popularity_score().times(0);
        let service = PoiService::new(
            Arc::new(repo),
            Arc::new(InMemoryOrganizationRepository::new()),
            Arc::new(InMemoryAppUserRepository::new()),
        );

        for score in [-0.1, 100.01, f64::INFINITY, f64::NAN] {
            assert!(service.update_popularity_score(&Uuid::new_v4(), score).await.is_err());
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_an_empty_list() {
        let mut repo = MockPoiRepository::new();
        repo.expect_search()
            .returning(|_, _| Err(DomainError::DatabaseError("connection reset".to_string())));
        let service = PoiService::new(
            Arc::new(repo),
            Arc::new(InMemoryOrganizationRepository::new()),
            Arc::new(InMemoryAppUserRepository::new()),
        );

        let result = service.search_with_filters(PoiFilter::default(), None).await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_non_positive_limit_skips_storage() {
        let mut repo = MockPoiRepository::new();
        repo.expect_find_top_popular().times(0);
        let service = PoiService::new(
            Arc::new(repo),
            Arc::new(InMemoryOrganizationRepository::new()),
            Arc::new(InMemoryAppUserRepository::new()),
        );

        assert!(service.find_top_popular(0).await.unwrap().is_empty());
        assert!(service.find_top_popular(-1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_known_organization() {
        let f = fixture().await;
        let unknown = Uuid::new_v4();
        let result = f.service.create(located(unknown, "Orphan", 3.0, 11.0, 0.0)).await;
        assert_eq!(result.unwrap_err(), DomainError::OrganizationNotFound(unknown));
    }

    #[tokio::test]
    async fn test_deactivated_poi_leaves_search() {
        let f = fixture().await;
        let poi = f
            .service
            .create(located(f.org_id, "Hilton", 3.848, 11.502, 80.0))
            .await
            .unwrap();
        f.service
            .deactivate(&poi.id, Some("renovation".to_string()), None)
            .await
            .unwrap();

        assert!(f
            .service
            .search_with_filters(PoiFilter::default(), None)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(f.service.list_by_organization(&f.org_id).await.unwrap().len(), 1);

        f.service.activate(&poi.id, None).await.unwrap();
        assert_eq!(f.service.list_active().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_and_delete() {
        let f = fixture().await;
        let poi = f
            .service
            .create(located(f.org_id, "Hilton", 3.848, 11.502, 80.0))
            .await
            .unwrap();

        let updated = f
            .service
            .update(
                &poi.id,
                PoiChanges {
                    website_url: Some("https://hilton.example".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.website_url.as_deref(), Some("https://hilton.example"));
        assert_eq!(updated.popularity_score, 80.0);

        f.service.delete(&poi.id).await.unwrap();
        assert_eq!(
            f.service.delete(&poi.id).await.unwrap_err(),
            DomainError::PoiNotFound(poi.id)
        );
    }

    #[tokio::test]
    async fn test_zero_page_rejected() {
        let f = fixture().await;
        let result = f
            .service
            .search_with_filters(PoiFilter::default(), Some(Pagination { page: 0, per_page: 10 }))
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }
}
