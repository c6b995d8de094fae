use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use poi_shared::Pagination;
use uuid::Uuid;

use crate::domain::PointOfInterest;
use crate::error::DomainError;
use crate::repositories::PoiRepository;
use crate::search::{self, NearbyPoi, NearbyQuery, PoiFilter};

#[derive(Default)]
pub struct InMemoryPoiRepository {
    inner: RwLock<HashMap<Uuid, PointOfInterest>>,
}

impl InMemoryPoiRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PoiRepository for InMemoryPoiRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PointOfInterest>, DomainError> {
        Ok(self.inner.read().get(id).cloned())
    }

    async fn find_all_active(&self) -> Result<Vec<PointOfInterest>, DomainError> {
        let store = self.inner.read();
        let mut pois: Vec<_> = store.values().filter(|p| p.is_active).cloned().collect();
        pois.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pois)
    }

    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PointOfInterest>, DomainError> {
        let store = self.inner.read();
        let mut pois: Vec<_> = store
            .values()
            .filter(|p| p.organization_id == *organization_id)
            .cloned()
            .collect();
        pois.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pois)
    }

    async fn find_nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyPoi>, DomainError> {
        let store = self.inner.read();
        Ok(search::rank_nearby(store.values(), query))
    }

    async fn search(
        &self,
        filter: &PoiFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<PointOfInterest>, DomainError> {
        let store = self.inner.read();
        Ok(search::rank_by_popularity(store.values(), filter, pagination))
    }

    async fn find_top_popular(&self, limit: i64) -> Result<Vec<PointOfInterest>, DomainError> {
        let store = self.inner.read();
        Ok(search::top_popular(store.values(), limit))
    }

    async fn update_popularity_score(
        &self,
        id: &Uuid,
        score: f64,
    ) -> Result<Option<PointOfInterest>, DomainError> {
        let mut store = self.inner.write();
        match store.get_mut(id) {
            Some(poi) => {
                poi.set_popularity_score(score)?;
                Ok(Some(poi.clone()))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, poi: &PointOfInterest) -> Result<PointOfInterest, DomainError> {
        self.inner.write().insert(poi.id, poi.clone());
        Ok(poi.clone())
    }

    async fn update(&self, poi: &PointOfInterest) -> Result<PointOfInterest, DomainError> {
        let mut store = self.inner.write();
        match store.get_mut(&poi.id) {
            Some(existing) => {
                *existing = poi.clone();
                Ok(poi.clone())
            }
            None => Err(DomainError::PoiNotFound(poi.id)),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.write().remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPointOfInterest;

    #[tokio::test]
    async fn test_popularity_score_write_is_bounded() {
        let repo = InMemoryPoiRepository::new();
        let poi = PointOfInterest::new(NewPointOfInterest {
            organization_id: Uuid::new_v4(),
            name: "Hilton".to_string(),
            poi_type: "HOTEL".to_string(),
            category: "Lodging".to_string(),
            ..Default::default()
        })
        .unwrap();
        repo.create(&poi).await.unwrap();

        assert!(repo.update_popularity_score(&poi.id, 101.0).await.is_err());
        let updated = repo.update_popularity_score(&poi.id, 42.0).await.unwrap().unwrap();
        assert_eq!(updated.popularity_score, 42.0);
        assert!(repo.update_popularity_score(&Uuid::new_v4(), 42.0).await.unwrap().is_none());
    }
}
