// ============================================================================
// POI API - Notification Broker
// File: crates/poi-api/src/notifications/broker.rs
// ============================================================================
//! Per-recipient broadcast channels feeding WebSocket connections.
//!
//! Each connected user gets a `broadcast` channel keyed by their id. A user
//! may hold several connections; every one of them receives the payload.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use poi_core::domain::NotificationPayload;
use poi_core::services::NotificationPublisher;

pub struct NotificationBroker {
    channels: RwLock<HashMap<Uuid, broadcast::Sender<NotificationPayload>>>,
    capacity: usize,
}

/// A live subscription. Dropping it releases the recipient's channel once
/// no other connection of that user is listening.
pub struct Subscription {
    // Declared before the guard so the receiver is dropped first
    pub receiver: broadcast::Receiver<NotificationPayload>,
    _release: ReleaseGuard,
}

struct ReleaseGuard {
    user_id: Uuid,
    broker: Arc<NotificationBroker>,
}

impl NotificationBroker {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(self: &Arc<Self>, user_id: Uuid) -> Subscription {
        let receiver = {
            let mut channels = self.channels.write();
            channels
                .entry(user_id)
                .or_insert_with(|| broadcast::channel(self.capacity).0)
                .subscribe()
        };
        debug!("User {} subscribed to notifications", user_id);

        Subscription {
            receiver,
            _release: ReleaseGuard {
                user_id,
                broker: Arc::clone(self),
            },
        }
    }

    /// Number of open connections for a user.
    pub fn connection_count(&self, user_id: &Uuid) -> usize {
        self.channels
            .read()
            .get(user_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    fn release(&self, user_id: &Uuid) {
        let mut channels = self.channels.write();
        if let Some(tx) = channels.get(user_id) {
            if tx.receiver_count() == 0 {
                channels.remove(user_id);
                debug!("Released notification channel of user {}", user_id);
            }
        }
    }
}

impl NotificationPublisher for NotificationBroker {
    fn publish(&self, payload: NotificationPayload) -> usize {
        let recipient_id = payload.recipient_id;
        let channels = self.channels.read();

        let Some(tx) = channels.get(&recipient_id) else {
            debug!("No live connection for user {}", recipient_id);
            return 0;
        };

        match tx.send(payload) {
            Ok(receivers) => receivers,
            Err(_) => {
                warn!("Notification channel of user {} has no receivers", recipient_id);
                0
            }
        }
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.broker.release(&self.user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;

    use chrono::Utc;
    use poi_core::domain::NotificationKind;

    fn payload(recipient_id: Uuid) -> NotificationPayload {
        NotificationPayload {
            id: Uuid::new_v4(),
            recipient_id,
            kind: NotificationKind::System,
            title: "Welcome".to_string(),
            content: "Hello".to_string(),
            metadata: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_only_recipient() {
        let broker = Arc::new(NotificationBroker::new(8));
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_sub = broker.subscribe(alice);
        let mut bob_sub = broker.subscribe(bob);

        assert_eq!(broker.publish(payload(alice)), 1);

        let received = alice_sub.receiver.recv().await.unwrap();
        assert_eq!(received.recipient_id, alice);
        assert!(bob_sub.receiver.try_recv().is_err());
    }

    #[test]
    fn test_publish_without_connection_returns_zero() {
        let broker = NotificationBroker::new(8);
        assert_eq!(broker.publish(payload(Uuid::new_v4())), 0);
    }

    #[test]
    fn test_multiple_connections_all_receive() {
        let broker = Arc::new(NotificationBroker::new(8));
        let user = Uuid::new_v4();

        let _first = broker.subscribe(user);
        let _second = broker.subscribe(user);

        assert_eq!(broker.connection_count(&user), 2);
        assert_eq!(broker.publish(payload(user)), 2);
    }

    #[test]
    fn test_channel_released_after_last_subscription() {
        let broker = Arc::new(NotificationBroker::new(8));
        let user = Uuid::new_v4();

        let first = broker.subscribe(user);
        let second = broker.subscribe(user);
        drop(first);
        assert_eq!(broker.connection_count(&user), 1);

        drop(second);
        assert_eq!(broker.connection_count(&user), 0);
        assert!(broker.channels.read().is_empty());
    }

    #[test]
    fn test_concurrent_last_drops_release_channel() {
        let broker = Arc::new(NotificationBroker::new(8));

        for _ in 0..200 {
            let user = Uuid::new_v4();
            let first = broker.subscribe(user);
            let second = broker.subscribe(user);
            let barrier = Barrier::new(2);

            std::thread::scope(|s| {
                for sub in [first, second] {
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        drop(sub);
                    });
                }
            });

            assert_eq!(broker.connection_count(&user), 0);
        }
        assert!(broker.channels.read().is_empty());
    }
}
