use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use poi_core::domain::PoiPlatformStat;

use super::{created, ok, ApiResult, CreatedResult};
use crate::dto::platform_stat::PlatformStatRequest;
use crate::dto::{CountResponse, DeletedResponse, ExistsResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_stat(
    State(state): State<AppState>,
    body: Result<Json<PlatformStatRequest>, JsonRejection>,
) -> CreatedResult<PoiPlatformStat> {
    let Json(body) = body?;
    created(state.platform_stat_service.create(body.into()).await?)
}

pub async fn count_stats(State(state): State<AppState>) -> ApiResult<CountResponse> {
    let count = state.platform_stat_service.count().await?;
    ok(CountResponse { count })
}

pub async fn get_stat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PoiPlatformStat> {
    ok(state.platform_stat_service.get(&id).await?)
}

pub async fn stat_exists(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<ExistsResponse> {
    let exists = state.platform_stat_service.exists(&id).await?;
    ok(ExistsResponse { exists })
}

pub async fn list_platform_stats(
    State(state): State<AppState>,
    Path(platform_type): Path<String>,
) -> ApiResult<Vec<PoiPlatformStat>> {
    ok(state.platform_stat_service.list_by_platform(&platform_type).await?)
}

pub async fn list_stats_on_date(
    State(state): State<AppState>,
    Path(stat_date): Path<NaiveDate>,
) -> ApiResult<Vec<PoiPlatformStat>> {
    ok(state.platform_stat_service.list_by_date(stat_date).await?)
}

pub async fn replace_stat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<PlatformStatRequest>, JsonRejection>,
) -> ApiResult<PoiPlatformStat> {
    let Json(body) = body?;
    ok(state.platform_stat_service.update(&id, body.into()).await?)
}

pub async fn delete_stat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.platform_stat_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_poi_stats(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
) -> ApiResult<Vec<PoiPlatformStat>> {
    ok(state.platform_stat_service.list_by_poi(&poi_id).await?)
}

pub async fn delete_poi_stats(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
) -> ApiResult<DeletedResponse> {
    let deleted = state.platform_stat_service.delete_by_poi(&poi_id).await?;
    ok(DeletedResponse { deleted })
}
