use serde::{Deserialize, Serialize};
use uuid::Uuid;

use poi_core::domain::ReviewChanges;
use poi_core::services::NewReview;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub poi_id: Uuid,
    pub user_id: Uuid,
    pub platform_type: String,
    pub rating: i32,
    pub review_text: Option<String>,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(req: CreateReviewRequest) -> Self {
        Self {
            poi_id: req.poi_id,
            user_id: req.user_id,
            platform_type: req.platform_type,
            rating: req.rating,
            review_text: req.review_text,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub review_text: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewChanges {
    fn from(req: UpdateReviewRequest) -> Self {
        Self {
            rating: req.rating,
            review_text: req.review_text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AverageRatingResponse {
    pub poi_id: Uuid,
    pub average_rating: f64,
}
