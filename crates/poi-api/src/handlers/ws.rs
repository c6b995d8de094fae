// ============================================================================
// POI API - Notification WebSocket
// File: crates/poi-api/src/handlers/ws.rs
// ============================================================================
//! `GET /ws/notifications?user_id=...`
//!
//! Each text frame is one JSON notification payload addressed to the
//! connected user. Client frames other than close are ignored.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::QueryRejection,
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::dto::notification::SubscribeParams;
use crate::error::ApiError;
use crate::notifications::NotificationBroker;

pub async fn notifications_socket(
    ws: WebSocketUpgrade,
    State(broker): State<Arc<NotificationBroker>>,
    params: Result<Query<SubscribeParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let user_id = params.user_id;
    Ok(ws.on_upgrade(move |socket| stream_notifications(socket, broker, user_id)))
}

async fn stream_notifications(socket: WebSocket, broker: Arc<NotificationBroker>, user_id: Uuid) {
    let mut subscription = broker.subscribe(user_id);
    let (mut sender, mut receiver) = socket.split();
    info!("Notification socket opened for user {}", user_id);

    loop {
        tokio::select! {
            received = subscription.receiver.recv() => match received {
                Ok(payload) => {
                    if payload.recipient_id != user_id {
                        continue;
                    }
                    let text = match serde_json::to_string(&payload) {
                        Ok(text) => text,
                        Err(e) => {
                            error!("Failed to encode notification {}: {}", payload.id, e);
                            continue;
                        }
                    };
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("User {} socket lagged, {} notifications skipped", user_id, skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    info!("Notification socket closed for user {}", user_id);
}
