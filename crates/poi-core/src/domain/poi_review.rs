//! POI review domain entity

use chrono::{DateTime, Utc};
use poi_shared::constants::{MAX_RATING, MIN_RATING};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PoiReview {
    pub id: Uuid,
    pub poi_id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Platform type is required"))]
    pub platform_type: String,

    #[validate(range(min = MIN_RATING, max = MAX_RATING, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 5000, message = "Review text too long"))]
    pub review_text: Option<String>,

    pub likes: i32,
    pub dislikes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewChanges {
    pub rating: Option<i32>,
    pub review_text: Option<String>,
}

/// Aggregated review figures for a single POI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub review_count: i64,
    pub average_rating: f64,
    pub total_likes: i64,
    pub total_dislikes: i64,
}

impl PoiReview {
    pub fn new(
        poi_id: Uuid,
        user_id: Uuid,
        organization_id: Uuid,
        platform_type: String,
        rating: i32,
        review_text: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let review = Self {
            id: Uuid::new_v4(),
            poi_id,
            user_id,
            organization_id,
            platform_type: platform_type.trim().to_string(),
            rating,
            review_text: review_text.map(|t| t.trim().to_string()),
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
        };

        review.validate()?;
        Ok(review)
    }

    pub fn apply_changes(&mut self, changes: ReviewChanges) -> Result<(), validator::ValidationErrors> {
        if let Some(rating) = changes.rating {
            self.rating = rating;
        }
        if let Some(text) = changes.review_text {
            self.review_text = Some(text.trim().to_string());
        }
        self.validate()
    }
}

impl ReviewStats {
    /// Folds a set of reviews into counts and a mean rating (0.0 when empty).
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a PoiReview>) -> Self {
        let mut stats = ReviewStats::default();
        let mut rating_sum = 0i64;
        for review in reviews {
            stats.review_count += 1;
            rating_sum += review.rating as i64;
            stats.total_likes += review.likes as i64;
            stats.total_dislikes += review.dislikes as i64;
        }
        if stats.review_count > 0 {
            stats.average_rating = rating_sum as f64 / stats.review_count as f64;
        }
        stats
    }
}
