//! UseCase: 切断処理
//!
//! 送信チャネルを外し、保留中の返信をキャンセルしてから接続を取り除き、
//! 残りの接続に leave を通知します。

use std::sync::Arc;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, MessagePusher};

use super::{deferred_responder::DeferredResponder, presence::PresenceBroadcaster};

/// 切断のユースケース
pub struct DisconnectUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    responder: Arc<DeferredResponder>,
    presence: Arc<PresenceBroadcaster>,
}

impl DisconnectUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        responder: Arc<DeferredResponder>,
        presence: Arc<PresenceBroadcaster>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            responder,
            presence,
        }
    }

    /// Tear down `connection_id`.
    ///
    /// The outbound channel is detached first, so a reply that already passed
    /// its cancellation check finds no connection to write to. Pending replies
    /// are then cancelled before the entry is removed. Repeated
    /// calls are no-ops and do not broadcast a second leave.
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Connection> {
        self.message_pusher.unregister_client(connection_id).await;
        self.responder.cancel_all(connection_id).await;

        let removed = self.registry.unregister(connection_id).await?;
        tracing::info!(
            "Connection '{}' removed, {} remaining",
            connection_id,
            self.registry.count().await
        );

        self.presence.broadcast_leave(connection_id).await;
        Some(removed)
    }
}
