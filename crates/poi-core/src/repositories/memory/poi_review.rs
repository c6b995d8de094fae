use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{PoiReview, ReviewStats};
use crate::error::DomainError;
use crate::repositories::PoiReviewRepository;

#[derive(Default)]
pub struct InMemoryPoiReviewRepository {
    inner: RwLock<HashMap<Uuid, PoiReview>>,
}

impl InMemoryPoiReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_newest_first(&self, predicate: impl Fn(&PoiReview) -> bool) -> Vec<PoiReview> {
        let store = self.inner.read();
        let mut reviews: Vec<_> = store.values().filter(|&r| predicate(r)).cloned().collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        reviews
    }

    fn bump(&self, id: &Uuid, apply: impl FnOnce(&mut PoiReview)) -> Option<PoiReview> {
        let mut store = self.inner.write();
        store.get_mut(id).map(|review| {
            apply(review);
            review.clone()
        })
    }
}

#[async_trait]
impl PoiReviewRepository for InMemoryPoiReviewRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError> {
        Ok(self.inner.read().get(id).cloned())
    }

    async fn find_by_poi(&self, poi_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        Ok(self.collect_newest_first(|r| r.poi_id == *poi_id))
    }

    async fn find_by_user(&self, user_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        Ok(self.collect_newest_first(|r| r.user_id == *user_id))
    }

    async fn find_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        Ok(self.collect_newest_first(|r| r.organization_id == *organization_id))
    }

    async fn stats_for_poi(&self, poi_id: &Uuid) -> Result<ReviewStats, DomainError> {
        let store = self.inner.read();
        Ok(ReviewStats::from_reviews(
            store.values().filter(|r| r.poi_id == *poi_id),
        ))
    }

    async fn increment_likes(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError> {
        Ok(self.bump(id, |r| r.likes += 1))
    }

    async fn increment_dislikes(&self, id: &Uuid) -> Result<Option<PoiReview>, DomainError> {
        Ok(self.bump(id, |r| r.dislikes += 1))
    }

    async fn create(&self, review: &PoiReview) -> Result<PoiReview, DomainError> {
        self.inner.write().insert(review.id, review.clone());
        Ok(review.clone())
    }

    async fn update(&self, review: &PoiReview) -> Result<PoiReview, DomainError> {
        let mut store = self.inner.write();
        match store.get_mut(&review.id) {
            Some(existing) => {
                *existing = review.clone();
                Ok(review.clone())
            }
            None => Err(DomainError::ReviewNotFound(review.id)),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.write().remove(id).is_some())
    }
}
