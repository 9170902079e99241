//! UseCase: 接続処理
//!
//! 新しい接続に id を払い出し、Registry・MessagePusher・DeferredResponder に登録します。

use std::sync::Arc;

use support_relay_shared::time::Clock;

use crate::domain::{
    ClientDescriptor, Connection, ConnectionIdFactory, ConnectionRegistry, MessagePusher,
    PusherChannel, RegistryError, Timestamp,
};

use super::deferred_responder::DeferredResponder;

/// 接続のユースケース
pub struct ConnectUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    responder: Arc<DeferredResponder>,
    clock: Arc<dyn Clock>,
}

impl ConnectUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        responder: Arc<DeferredResponder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            responder,
            clock,
        }
    }

    /// Register a new connection and attach its outbound channel.
    ///
    /// A duplicate id is a registry defect: it is logged and the connection
    /// proceeds with the entry already in the registry.
    pub async fn execute(
        &self,
        client_descriptor: Option<ClientDescriptor>,
        sender: PusherChannel,
    ) -> Connection {
        let id = ConnectionIdFactory::generate();
        let connection = Connection::new(
            id.clone(),
            Timestamp::new(self.clock.now_millis()),
            client_descriptor,
        );

        let connection = match self.registry.register(connection.clone()).await {
            Ok(()) => {
                self.message_pusher.register_client(id.clone(), sender).await;
                self.responder.open(&id).await;
                connection
            }
            Err(RegistryError::DuplicateConnection(existing)) => {
                // The existing entry keeps its outbound channel
                tracing::error!(
                    "Connection id '{}' is already registered; reusing the existing entry",
                    existing
                );
                self.registry.get(&id).await.unwrap_or(connection)
            }
        };

        tracing::info!(
            "Connection '{}' registered (client: {})",
            connection.id,
            connection
                .client_descriptor
                .as_ref()
                .map_or("unknown", |d| d.as_str())
        );
        connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{AutoReplyPolicy, ConnectionId, MessageIdFactory, MessagePushError, OutboundEvent},
        infrastructure::repository::InMemoryConnectionRegistry,
        usecase::test_support::RecordingPusher,
    };
    use async_trait::async_trait;
    use support_relay_shared::time::FixedClock;
    use tokio::sync::mpsc;

    /// Registry that already holds every id it is asked to register.
    struct OccupiedRegistry {
        existing: Connection,
    }

    #[async_trait]
    impl ConnectionRegistry for OccupiedRegistry {
        async fn register(&self, connection: Connection) -> Result<(), RegistryError> {
            Err(RegistryError::DuplicateConnection(connection.id.into_string()))
        }

        async fn unregister(&self, _id: &ConnectionId) -> Option<Connection> {
            None
        }

        async fn get(&self, _id: &ConnectionId) -> Option<Connection> {
            Some(self.existing.clone())
        }

        async fn count(&self) -> usize {
            1
        }

        async fn for_each_except(
            &self,
            _id: &ConnectionId,
            _f: &mut (dyn for<'a> FnMut(&'a Connection) + Send),
        ) {
        }
    }

    #[tokio::test]
    async fn test_connect_registers_everywhere() {
        // テスト項目: 接続すると Registry・Pusher・Responder に登録される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher = Arc::new(RecordingPusher::new());
        let clock = Arc::new(FixedClock::new(5_000));
        let responder = Arc::new(DeferredResponder::new(
            pusher.clone(),
            clock.clone(),
            Arc::new(MessageIdFactory::new()),
            AutoReplyPolicy::default(),
        ));
        let usecase = ConnectUseCase::new(registry.clone(), pusher.clone(), responder.clone(), clock);
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection = usecase
            .execute(ClientDescriptor::parse("Mozilla/5.0"), tx)
            .await;

        // then (期待する結果):
        assert_eq!(connection.connected_at, Timestamp::new(5_000));
        assert_eq!(
            connection.client_descriptor.as_ref().map(|d| d.as_str()),
            Some("Mozilla/5.0")
        );
        assert_eq!(registry.count().await, 1);
        assert_eq!(registry.get(&connection.id).await, Some(connection.clone()));
        assert_eq!(responder.open_connections().await, 1);
        assert!(
            pusher
                .push_to(
                    &connection.id,
                    &crate::domain::OutboundEvent::Typing {
                        user_id: connection.id.clone(),
                        is_typing: false,
                    }
                )
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_each_connection_gets_a_fresh_id() {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher = Arc::new(RecordingPusher::new());
        let clock = Arc::new(FixedClock::new(0));
        let responder = Arc::new(DeferredResponder::new(
            pusher.clone(),
            clock.clone(),
            Arc::new(MessageIdFactory::new()),
            AutoReplyPolicy::default(),
        ));
        let usecase = ConnectUseCase::new(registry.clone(), pusher, responder, clock);

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let a = usecase.execute(None, tx1).await;
        let b = usecase.execute(None, tx2).await;

        assert_ne!(a.id, b.id);
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_keeps_existing_entry_and_channel() {
        // テスト項目: 重複登録時は既存エントリを使い、Pusher の送信チャネルを上書きしない
        // given (前提条件):
        let existing = Connection::new(
            ConnectionId::new("alice".to_string()).unwrap(),
            Timestamp::new(1_000),
            ClientDescriptor::parse("first-client"),
        );
        let registry = Arc::new(OccupiedRegistry {
            existing: existing.clone(),
        });
        let pusher = Arc::new(RecordingPusher::new());
        let clock = Arc::new(FixedClock::new(9_000));
        let responder = Arc::new(DeferredResponder::new(
            pusher.clone(),
            clock.clone(),
            Arc::new(MessageIdFactory::new()),
            AutoReplyPolicy::default(),
        ));
        let usecase = ConnectUseCase::new(registry, pusher.clone(), responder.clone(), clock);
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection = usecase.execute(ClientDescriptor::parse("second-client"), tx).await;

        // then (期待する結果):
        assert_eq!(connection, existing);
        assert_eq!(responder.open_connections().await, 0);
        let push = pusher
            .push_to(
                &existing.id,
                &OutboundEvent::Typing {
                    user_id: existing.id.clone(),
                    is_typing: false,
                },
            )
            .await;
        assert_eq!(
            push,
            Err(MessagePushError::ConnectionNotFound("alice".to_string()))
        );
    }
}
