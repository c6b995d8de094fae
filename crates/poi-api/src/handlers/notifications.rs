use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use uuid::Uuid;

use poi_core::domain::Notification;

use super::{created, ok, ApiResult, CreatedResult};
use crate::dto::notification::{CreateNotificationRequest, MarkReadRequest};
use crate::dto::{CountResponse, PageParams};
use crate::state::AppState;

/// Stores a notification and pushes it to the recipient's open sockets.
pub async fn send_notification(
    State(state): State<AppState>,
    body: Result<Json<CreateNotificationRequest>, JsonRejection>,
) -> CreatedResult<Notification> {
    let Json(body) = body?;
    created(state.notification_service.create_and_send(body.into()).await?)
}

pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Notification> {
    ok(state.notification_service.get(&id).await?)
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<MarkReadRequest>, JsonRejection>,
) -> ApiResult<Notification> {
    let Json(body) = body?;
    ok(state.notification_service.mark_read(&id, &body.user_id).await?)
}

pub async fn list_user_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Vec<Notification>> {
    let Query(params) = params?;
    ok(state
        .notification_service
        .list_for_user(&user_id, params.pagination())
        .await?)
}

pub async fn unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<CountResponse> {
    let count = state.notification_service.unread_count(&user_id).await?;
    ok(CountResponse { count })
}
