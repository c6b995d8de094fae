//! POI review repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{PoiReview, ReviewStats};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError>;
    /// Newest first
    async fn find_by_poi(&self, poi_id: &Uuid) -> Result<Vec<PoiReview>, DomainError>;
    /// Newest first
    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<PoiReview>, DomainError>;
    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiReview>, DomainError>;
    async fn stats_for_poi(&self, poi_id: &Uuid) -> Result<ReviewStats, DomainError>;
    async fn increment_likes(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError>;
    async fn increment_dislikes(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError>;
    async fn create(&self, review: &PoiReview) -> Result<PoiReview, DomainError>;
    async fn update(&self, review: &PoiReview) -> Result<PoiReview, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError>;
}
