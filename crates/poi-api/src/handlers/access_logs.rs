use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use poi_core::domain::PoiAccessLog;

use super::{created, ok, ApiResult, CreatedResult};
use crate::dto::access_log::{
    AccessCountParams, CreateAccessLogRequest, DateRangeParams, PurgeParams, SinceParams,
    UpdateAccessLogRequest,
};
use crate::dto::{CountResponse, DeletedResponse, PageParams};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn record_access(
    State(state): State<AppState>,
    body: Result<Json<CreateAccessLogRequest>, JsonRejection>,
) -> CreatedResult<PoiAccessLog> {
    let Json(body) = body?;
    created(state.access_log_service.create(body.into()).await?)
}

pub async fn get_access_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PoiAccessLog> {
    ok(state.access_log_service.get(&id).await?)
}

pub async fn update_access_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateAccessLogRequest>, JsonRejection>,
) -> ApiResult<PoiAccessLog> {
    let Json(body) = body?;
    ok(state.access_log_service.update(&id, body.into()).await?)
}

pub async fn delete_access_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.access_log_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_by_date_range(
    State(state): State<AppState>,
    params: Result<Query<DateRangeParams>, QueryRejection>,
) -> ApiResult<Vec<PoiAccessLog>> {
    let Query(params) = params?;
    ok(state
        .access_log_service
        .list_by_date_range(params.start, params.end)
        .await?)
}

pub async fn list_by_access_type(
    State(state): State<AppState>,
    Path(access_type): Path<String>,
) -> ApiResult<Vec<PoiAccessLog>> {
    ok(state.access_log_service.list_by_access_type(&access_type).await?)
}

pub async fn list_by_platform(
    State(state): State<AppState>,
    Path(platform_type): Path<String>,
) -> ApiResult<Vec<PoiAccessLog>> {
    ok(state.access_log_service.list_by_platform(&platform_type).await?)
}

pub async fn purge_access_logs(
    State(state): State<AppState>,
    params: Result<Query<PurgeParams>, QueryRejection>,
) -> ApiResult<DeletedResponse> {
    let Query(params) = params?;
    let deleted = state.access_log_service.purge_older_than(params.before).await?;
    ok(DeletedResponse { deleted })
}

pub async fn list_poi_access_logs(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Vec<PoiAccessLog>> {
    let Query(params) = params?;
    ok(state
        .access_log_service
        .list_by_poi(&poi_id, params.pagination())
        .await?)
}

pub async fn list_poi_organization_access_logs(
    State(state): State<AppState>,
    Path((poi_id, organization_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Vec<PoiAccessLog>> {
    ok(state
        .access_log_service
        .list_by_poi_and_organization(&poi_id, &organization_id)
        .await?)
}

pub async fn list_recent_poi_access_logs(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
    params: Result<Query<SinceParams>, QueryRejection>,
) -> ApiResult<Vec<PoiAccessLog>> {
    let Query(params) = params?;
    ok(state
        .access_log_service
        .list_recent_by_poi(&poi_id, params.since)
        .await?)
}

/// Total accesses of a POI, or only those of `access_type` when given.
pub async fn count_poi_access(
    State(state): State<AppState>,
    Path(poi_id): Path<Uuid>,
    params: Result<Query<AccessCountParams>, QueryRejection>,
) -> ApiResult<CountResponse> {
    let Query(params) = params?;
    let count = match params.access_type.as_deref() {
        Some(access_type) => {
            state
                .access_log_service
                .count_by_poi_and_access_type(&poi_id, access_type)
                .await?
        }
        None => state.access_log_service.count_by_poi(&poi_id).await?,
    };
    ok(CountResponse { count })
}

pub async fn list_organization_access_logs(
    State(state): State<AppState>,
    Path(organization_id): Path<Uuid>,
) -> ApiResult<Vec<PoiAccessLog>> {
    ok(state
        .access_log_service
        .list_by_organization(&organization_id)
        .await?)
}

pub async fn list_user_access_logs(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Vec<PoiAccessLog>> {
    ok(state.access_log_service.list_by_user(&user_id).await?)
}
