// ============================================================================
// POI API - Point of Interest Handlers
// File: crates/poi-api/src/handlers/pois.rs
// ============================================================================

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use poi_core::domain::{NewPointOfInterest, PoiChanges};
use poi_core::search::NearbyQuery;

use super::{created, ok, ApiResult, CreatedResult};
use crate::dto::poi::{
    ActivateRequest, CreatePoiRequest, DeactivateRequest, NearbyParams, NearbyPoiResponse,
    PoiResponse, PopularParams, PopularityUpdateRequest, SearchParams, UpdatePoiRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn search_pois(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Vec<PoiResponse>> {
    let Query(params) = params?;
    let (filter, pagination) = params.into_parts();

    let pois = state.poi_service.search_with_filters(filter, pagination).await?;
    ok(pois.into_iter().map(PoiResponse::from).collect())
}

pub async fn nearby_pois(
    State(state): State<AppState>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> ApiResult<Vec<NearbyPoiResponse>> {
    let Query(params) = params?;
    let radius_km = params.radius_km.unwrap_or(state.search.default_radius_km);

    let query = NearbyQuery::new(params.latitude, params.longitude, radius_km)?
        .with_filter(params.filter())
        .with_pagination(params.pagination());

    let results = state.poi_service.find_nearby(query).await?;
    ok(results.into_iter().map(NearbyPoiResponse::from).collect())
}

pub async fn popular_pois(
    State(state): State<AppState>,
    params: Result<Query<PopularParams>, QueryRejection>,
) -> ApiResult<Vec<PoiResponse>> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(state.search.default_popular_limit);

    let pois = state.poi_service.find_top_popular(limit).await?;
    ok(pois.into_iter().map(PoiResponse::from).collect())
}

pub async fn update_popularity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<PopularityUpdateRequest>, JsonRejection>,
) -> ApiResult<PoiResponse> {
    let Json(body) = body?;
    let poi = state.poi_service.update_popularity_score(&id, body.score).await?;
    ok(poi.into())
}

pub async fn list_active_pois(State(state): State<AppState>) -> ApiResult<Vec<PoiResponse>> {
    let pois = state.poi_service.list_active().await?;
    ok(pois.into_iter().map(PoiResponse::from).collect())
}

pub async fn list_organization_pois(
    State(state): State<AppState>,
    Path(organization_id): Path<Uuid>,
) -> ApiResult<Vec<PoiResponse>> {
    let pois = state.poi_service.list_by_organization(&organization_id).await?;
    ok(pois.into_iter().map(PoiResponse::from).collect())
}

pub async fn create_poi(
    State(state): State<AppState>,
    body: Result<Json<CreatePoiRequest>, JsonRejection>,
) -> CreatedResult<PoiResponse> {
    let Json(body) = body?;
    let input = NewPointOfInterest::try_from(body)?;

    let poi = state.poi_service.create(input).await?;
    info!("POI {} created via API", poi.id);
    created(poi.into())
}

pub async fn get_poi(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<PoiResponse> {
    let poi = state.poi_service.get(&id).await?;
    ok(poi.into())
}

pub async fn update_poi(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdatePoiRequest>, JsonRejection>,
) -> ApiResult<PoiResponse> {
    let Json(body) = body?;
    let changes = PoiChanges::try_from(body)?;

    let poi = state.poi_service.update(&id, changes).await?;
    ok(poi.into())
}

pub async fn activate_poi(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ActivateRequest>, JsonRejection>,
) -> ApiResult<PoiResponse> {
    let Json(body) = body?;
    let poi = state.poi_service.activate(&id, body.user_id).await?;
    ok(poi.into())
}

pub async fn deactivate_poi(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<DeactivateRequest>, JsonRejection>,
) -> ApiResult<PoiResponse> {
    let Json(body) = body?;
    let poi = state
        .poi_service
        .deactivate(&id, body.reason, body.user_id)
        .await?;
    ok(poi.into())
}

pub async fn delete_poi(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.poi_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
