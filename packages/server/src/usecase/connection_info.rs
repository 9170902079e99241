//! UseCase: 接続情報の取得

use std::sync::Arc;

use support_relay_shared::time::Clock;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePushError, MessagePusher, OutboundEvent, Timestamp};

pub struct GetConnectionInfoUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl GetConnectionInfoUseCase {
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

    /// Push a `connection-info` event to the requester only.
    pub async fn execute(&self, requester: &ConnectionId) -> Result<(), MessagePushError> {
        let event = OutboundEvent::ConnectionInfo {
            connection_id: requester.clone(),
            active_connections: self.registry.count().await,
            server_time: Timestamp::new(self.clock.now_millis()),
        };
        self.message_pusher.push_to(requester, &event).await
    }
}
