use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use poi_core::domain::AppUser;

use super::{created, ok, ApiResult, CreatedResult};
use crate::dto::user::{CreateUserRequest, UpdateUserRequest};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<AppUser>> {
    ok(state.user_service.list().await?)
}

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> CreatedResult<AppUser> {
    let Json(body) = body?;
    created(state.user_service.create(body.into()).await?)
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<AppUser> {
    ok(state.user_service.get(&id).await?)
}

pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<AppUser> {
    state
        .user_service
        .find_by_username(&username)
        .await?
        .map(ok)
        .unwrap_or_else(|| Err(ApiError::NotFound(format!("user with username {}", username))))
}

pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<AppUser> {
    state
        .user_service
        .find_by_email(&email)
        .await?
        .map(ok)
        .unwrap_or_else(|| Err(ApiError::NotFound(format!("user with email {}", email))))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<AppUser> {
    let Json(body) = body?;
    ok(state.user_service.update(&id, body.into()).await?)
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.user_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
