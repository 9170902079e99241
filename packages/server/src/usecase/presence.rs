//! Presence Broadcaster: typing and leave notifications, broadcast-except-self.

use std::sync::Arc;

use support_relay_shared::time::Clock;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, OutboundEvent, Timestamp};

/// Fans presence events out to every live connection other than the origin.
pub struct PresenceBroadcaster {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl PresenceBroadcaster {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// Tell everyone but `origin` that it started or stopped typing.
    ///
    /// Returns the connections the event was addressed to.
    pub async fn broadcast_typing(&self, origin: &ConnectionId, is_typing: bool) -> Vec<ConnectionId> {
        let event = OutboundEvent::Typing {
            user_id: origin.clone(),
            is_typing,
        };
        self.broadcast_except(origin, event).await
    }

    /// Tell everyone but `origin` that it left.
    ///
    /// Call after `origin` has been removed from the registry so the event
    /// carries the post-removal count.
    pub async fn broadcast_leave(&self, origin: &ConnectionId) -> Vec<ConnectionId> {
        let event = OutboundEvent::PresenceLeave {
            user_id: origin.clone(),
            active_connections: self.registry.count().await,
            at: Timestamp::new(self.clock.now_millis()),
        };
        self.broadcast_except(origin, event).await
    }

    async fn broadcast_except(&self, origin: &ConnectionId, event: OutboundEvent) -> Vec<ConnectionId> {
        let mut targets = Vec::new();
        self.registry
            .for_each_except(origin, &mut |connection| targets.push(connection.id.clone()))
            .await;

        if let Err(e) = self
            .message_pusher
            .broadcast(targets.clone(), &event)
            .await
        {
            tracing::warn!("Failed to broadcast {} from '{}': {}", event.name(), origin, e);
        } else {
            tracing::debug!(
                "Broadcasted {} from '{}' to {} connection(s)",
                event.name(),
                origin,
                targets.len()
            );
        }
        targets
    }
}
