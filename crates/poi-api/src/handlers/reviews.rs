use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use poi_core::domain::{PoiReview, ReviewStats};

use super::{created, ok, ApiResult, CreatedResult};
use crate::dto::review::{AverageRatingResponse, CreateReviewRequest, UpdateReviewRequest};
use crate::dto::CountResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_review(
    State(state): State<AppState>,
    body: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> CreatedResult<PoiReview> {
    let Json(body) = body?;
    created(state.review_service.create(body.into()).await?)
}

pub async fn get_review(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<PoiReview> {
    ok(state.review_service.get(&id).await?)
}

pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateReviewRequest>, JsonRejection>,
) -> ApiResult<PoiReview> {
    let Json(body) = body?;
    ok(state.review_service.update(&id, body.into()).await?)
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.review_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like_review(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<PoiReview> {
    ok(state.review_service.like(&id).await?)
}

pub async fn dislike_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PoiReview> {
    ok(state.review_service.dislike(&id).await?)
}

pub async fn list_poi_reviews(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
) -> ApiResult<Vec<PoiReview>> {
    ok(state.review_service.list_by_poi(&poi_id).await?)
}

pub async fn list_user_reviews(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Vec<PoiReview>> {
    ok(state.review_service.list_by_user(&user_id).await?)
}

pub async fn list_organization_reviews(
    State(state): State<AppState>,
    Path(organization_id): Path<Uuid>,
) -> ApiResult<Vec<PoiReview>> {
    ok(state.review_service.list_by_organization(&organization_id).await?)
}

pub async fn poi_review_stats(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
) -> ApiResult<ReviewStats> {
    ok(state.review_service.stats_for_poi(&poi_id).await?)
}

pub async fn poi_average_rating(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
) -> ApiResult<AverageRatingResponse> {
    let average_rating = state.review_service.average_rating(&poi_id).await?;
    ok(AverageRatingResponse { poi_id, average_rating })
}

pub async fn poi_review_count(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
) -> ApiResult<CountResponse> {
    let count = state.review_service.count_for_poi(&poi_id).await?;
    ok(CountResponse { count })
}
