use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use poi_core::domain::{Organization, PlatformCount, PoiPlatformStat};

use super::{created, ok, ApiResult, CreatedResult};
use crate::dto::organization::{CreateOrganizationRequest, UpdateOrganizationRequest};
use crate::dto::platform_stat::StatDateRangeParams;
use crate::dto::DeletedResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_organizations(State(state): State<AppState>) -> ApiResult<Vec<Organization>> {
    ok(state.organization_service.list().await?)
}

pub async fn create_organization(
    State(state): State<AppState>,
    body: Result<Json<CreateOrganizationRequest>, JsonRejection>,
) -> CreatedResult<Organization> {
    let Json(body) = body?;
    let organization = state
        .organization_service
        .create(&body.name, body.code.as_deref(), body.org_type.as_deref())
        .await?;
    created(organization)
}

pub async fn get_organization(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Organization> {
    ok(state.organization_service.get(&id).await?)
}

pub async fn update_organization(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateOrganizationRequest>, JsonRejection>,
) -> ApiResult<Organization> {
    let Json(body) = body?;
    ok(state.organization_service.update(&id, body.into()).await?)
}

pub async fn delete_organization(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.organization_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Access counts per platform across the organization's POIs.
pub async fn platform_breakdown(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<PlatformCount>> {
    ok(state.access_log_service.platform_breakdown(&id).await?)
}

/// Stats of an organization, optionally narrowed to an inclusive date range.
pub async fn list_organization_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    params: Result<Query<StatDateRangeParams>, QueryRejection>,
) -> ApiResult<Vec<PoiPlatformStat>> {
    let Query(params) = params?;
    let stats = match (params.start, params.end) {
        (Some(start), Some(end)) => {
            state
                .platform_stat_service
                .list_by_organization_and_date_range(&id, start, end)
                .await?
        }
        (None, None) => state.platform_stat_service.list_by_organization(&id).await?,
        _ => {
            return Err(ApiError::BadRequest(
                "start and end must be provided together".to_string(),
            ))
        }
    };
    ok(stats)
}

pub async fn delete_organization_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<DeletedResponse> {
    let deleted = state.platform_stat_service.delete_by_organization(&id).await?;
    ok(DeletedResponse { deleted })
}
