//! Relay assembly: wires the use cases around one shared registry.

use std::sync::Arc;

use support_relay_shared::time::Clock;

use crate::domain::{
    AutoReplyPolicy, ConnectionRegistry, MessageIdFactory, MessagePusher, MessageStore,
};

use super::{
    connect::ConnectUseCase, connection_info::GetConnectionInfoUseCase,
    deferred_responder::DeferredResponder, disconnect::DisconnectUseCase,
    get_stats::GetStatsUseCase, presence::PresenceBroadcaster, send_message::SendMessageUseCase,
};

/// Everything a relay session needs, built once at startup.
///
/// There is no process-wide state: every collaborator is owned here and
/// shared by reference counting.
pub struct Relay {
    pub connect: ConnectUseCase,
    pub send_message: SendMessageUseCase,
    pub disconnect: DisconnectUseCase,
    pub connection_info: GetConnectionInfoUseCase,
    pub stats: GetStatsUseCase,
    pub presence: Arc<PresenceBroadcaster>,
    pub(crate) message_pusher: Arc<dyn MessagePusher>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) message_ids: Arc<MessageIdFactory>,
}

impl Relay {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        message_store: Option<Arc<dyn MessageStore>>,
        clock: Arc<dyn Clock>,
        policy: AutoReplyPolicy,
    ) -> Self {
        let message_ids = Arc::new(MessageIdFactory::new());
        let responder = Arc::new(DeferredResponder::new(
            message_pusher.clone(),
            clock.clone(),
            message_ids.clone(),
            policy,
        ));
        let presence = Arc::new(PresenceBroadcaster::new(
            registry.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));

        Self {
            connect: ConnectUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                responder.clone(),
                clock.clone(),
            ),
            send_message: SendMessageUseCase::new(
                message_store.clone(),
                responder.clone(),
                clock.clone(),
                message_ids.clone(),
            ),
            disconnect: DisconnectUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                responder,
                presence.clone(),
            ),
            connection_info: GetConnectionInfoUseCase::new(
                registry.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            stats: GetStatsUseCase::new(registry, message_store),
            presence,
            message_pusher,
            clock,
            message_ids,
        }
    }
}
