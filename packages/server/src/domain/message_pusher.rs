//! MessagePusher trait.
//!
//! Delivery of outbound events to connections. The transport that owns the
//! sockets implements it; use cases only see connection ids and events.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError, event::OutboundEvent, value_object::ConnectionId,
};

/// Per-connection outbound channel of encoded frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Attach the outbound channel of a newly opened connection.
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Detach a connection. Later pushes to it fail with `ConnectionNotFound`.
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Push an event to one connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// Push an event to several connections. Individual failures are logged
    /// and skipped.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;
}
