//! HTTP handlers

pub mod health;
pub mod pois;
pub mod organizations;
pub mod users;
pub mod reviews;
pub mod access_logs;
pub mod platform_stats;
pub mod notifications;
pub mod ws;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::error::ApiError;
use crate::response::ApiResponse;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub(crate) fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

pub(crate) fn created<T: Serialize>(data: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}
