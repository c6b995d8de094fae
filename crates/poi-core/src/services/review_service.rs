//! POI reviews and their aggregates

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{PoiReview, ReviewChanges, ReviewStats};
use crate::error::DomainError;
use crate::repositories::{AppUserRepository, PoiRepository, PoiReviewRepository};

#[derive(Debug, Clone)]
pub struct NewReview {
    pub poi_id: Uuid,
    pub user_id: Uuid,
    pub platform_type: String,
    pub rating: i32,
    pub review_text: Option<String>,
}

pub struct ReviewService {
    review_repo: Arc<dyn PoiReviewRepository>,
    poi_repo: Arc<dyn PoiRepository>,
    user_repo: Arc<dyn AppUserRepository>,
}

impl ReviewService {
    pub fn new(
        review_repo: Arc<dyn PoiReviewRepository>,
        poi_repo: Arc<dyn PoiRepository>,
        user_repo: Arc<dyn AppUserRepository>,
    ) -> Self {
        Self {
            review_repo,
            poi_repo,
            user_repo,
        }
    }

    /// The review inherits the organization of its POI
    pub async fn create(&self, input: NewReview) -> Result<PoiReview, DomainError> {
        let poi = self
            .poi_repo
            .find_by_id(&input.poi_id)
            .await?
            .ok_or(DomainError::PoiNotFound(input.poi_id))?;
        if self.user_repo.find_by_id(&input.user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(input.user_id));
        }

        let review = PoiReview::new(
            poi.id,
            input.user_id,
            poi.organization_id,
            input.platform_type,
            input.rating,
            input.review_text,
        )?;
        let created = self.review_repo.create(&review).await?;

        info!("Review {} posted on POI {} (rating {})", created.id, poi.id, created.rating);
        Ok(created)
    }

    pub async fn get(&self, id: &Uuid) -> Result<PoiReview, DomainError> {
        self.review_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ReviewNotFound(*id))
    }

    pub async fn list_by_poi(&self, poi_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        self.review_repo.find_by_poi(poi_id).await
    }

    pub async fn list_by_user(&self, user_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        self.review_repo.find_by_user(user_id).await
    }

    pub async fn list_by_organization(&self, organization_id: &Uuid) -> Result<Vec<PoiReview>, DomainError> {
        self.review_repo.find_by_organization(organization_id).await
    }

    pub async fn update(&self, id: &Uuid, changes: ReviewChanges) -> Result<PoiReview, DomainError> {
        let mut review = self.get(id).await?;
        review.apply_changes(changes)?;
        let updated = self.review_repo.update(&review).await?;
        info!("Review updated: {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        if !self.review_repo.delete(id).await? {
            return Err(DomainError::ReviewNotFound(*id));
        }
        info!("Review deleted: {}", id);
        Ok(())
    }

    pub async fn stats_for_poi(&self, poi_id: &Uuid) -> Result<ReviewStats, DomainError> {
        self.review_repo.stats_for_poi(poi_id).await
    }

    /// 0.0 when the POI has no reviews
    pub async fn average_rating(&self, poi_id: &Uuid) -> Result<f64, DomainError> {
        Ok(self.stats_for_poi(poi_id).await?.average_rating)
    }

    pub async fn count_for_poi(&self, poi_id: &Uuid) -> Result<i64, DomainError> {
        Ok(self.stats_for_poi(poi_id).await?.review_count)
    }

    pub async fn like(&self, id: &Uuid) -> Result<PoiReview, DomainError> {
        self.review_repo
            .increment_likes(id)
            .await?
            .ok_or(DomainError::ReviewNotFound(*id))
    }

    pub async fn dislike(&self, id: &Uuid) -> Result<PoiReview, DomainError> {
        self.review_repo
            .increment_dislikes(id)
            .await?
            .ok_or(DomainError::ReviewNotFound(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppUser, NewPointOfInterest, PointOfInterest, UserRole};
    use crate::repositories::memory::{
        InMemoryAppUserRepository, InMemoryPoiRepository, InMemoryPoiReviewRepository,
    };

    struct Fixture {
        service: ReviewService,
        poi: PointOfInterest,
        user: AppUser,
    }

    async fn fixture() -> Fixture {
        let pois = Arc::new(InMemoryPoiRepository::new());
        let users = Arc::new(InMemoryAppUserRepository::new());
        let org_id = Uuid::new_v4();

        let poi = PointOfInterest::new(NewPointOfInterest {
            organization_id: org_id,
            name: "Hilton".to_string(),
            poi_type: "HOTEL".to_string(),
            category: "Lodging".to_string(),
            ..Default::default()
        })
        .unwrap();
        pois.create(&poi).await.unwrap();

        let user = AppUser::new(org_id, "amina".to_string(), None, None, UserRole::User).unwrap();
        users.create(&user).await.unwrap();

        Fixture {
            service: ReviewService::new(Arc::new(InMemoryPoiReviewRepository::new()), pois, users),
            poi,
            user,
        }
    }

    fn review(f: &Fixture, rating: i32) -> NewReview {
        NewReview {
            poi_id: f.poi.id,
            user_id: f.user.id,
            platform_type: "ANDROID".to_string(),
            rating,
            review_text: None,
        }
    }

    #[tokio::test]
    async fn test_review_inherits_poi_organization() {
        let f = fixture().await;
        let created = f.service.create(review(&f, 4)).await.unwrap();
        assert_eq!(created.organization_id, f.poi.organization_id);
        assert_eq!(
            f.service.list_by_organization(&f.poi.organization_id).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_average_and_count() {
        let f = fixture().await;
        assert_eq!(f.service.average_rating(&f.poi.id).await.unwrap(), 0.0);

        f.service.create(review(&f, 5)).await.unwrap();
        f.service.create(review(&f, 2)).await.unwrap();

        assert_eq!(f.service.count_for_poi(&f.poi.id).await.unwrap(), 2);
        assert!((f.service.average_rating(&f.poi.id).await.unwrap() - 3.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_like_and_dislike() {
        let f = fixture().await;
        let created = f.service.create(review(&f, 3)).await.unwrap();
        f.service.like(&created.id).await.unwrap();
        f.service.like(&created.id).await.unwrap();
        let after = f.service.dislike(&created.id).await.unwrap();
        assert_eq!((after.likes, after.dislikes), (2, 1));

        let stats = f.service.stats_for_poi(&f.poi.id).await.unwrap();
        assert_eq!(stats.total_likes, 2);
        assert_eq!(stats.total_dislikes, 1);

        let missing = Uuid::new_v4();
        assert_eq!(
            f.service.like(&missing).await.unwrap_err(),
            DomainError::ReviewNotFound(missing)
        );
    }

    #[tokio::test]
    async fn test_invalid_rating_and_unknown_poi() {
        let f = fixture().await;
        assert!(matches!(
            f.service.create(review(&f, 6)).await,
            Err(DomainError::ValidationError(_))
        ));

        let mut input = review(&f, 4);
        input.poi_id = Uuid::new_v4();
        assert!(matches!(
            f.service.create(input).await,
            Err(DomainError::PoiNotFound(_))
        ));
    }
}
