//! Point of interest repository trait (port)

use async_trait::async_trait;
use poi_shared::Pagination;
use uuid::Uuid;

use crate::domain::PointOfInterest;
use crate::error::DomainError;
use crate::search::{NearbyPoi, NearbyQuery, PoiFilter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PointOfInterest>, DomainError>;
    async fn find_all_active(&self) -> Result<Vec<PointOfInterest>, DomainError>;
    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PointOfInterest>, DomainError>;

    /// Active located POIs within `query.radius_km`, nearest first.
    async fn find_nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyPoi>, DomainError>;

    /// Active POIs matching `filter`, most popular first.
    async fn search(
        &self,
        filter: &PoiFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<PointOfInterest>, DomainError>;

    async fn find_top_popular(&self, limit: i64) -> Result<Vec<PointOfInterest>, DomainError>;

    /// Sets the score and `updated_at` in one write. `None` when the id is unknown.
    async fn update_popularity_score(
        &self,
        id: &Uuid,
        score: f64,
    ) -> Result<Option<PointOfInterest>, DomainError>;

    async fn create(&self, poi: &PointOfInterest) -> Result<PointOfInterest, DomainError>;
    async fn update(&self, poi: &PointOfInterest) -> Result<PointOfInterest, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}
