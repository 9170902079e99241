//! Entities.

use serde::Serialize;

use super::value_object::{ChatText, ClientDescriptor, ConnectionId, MessageId, Sender, Timestamp};

/// One live transport-level connection.
///
/// Owned by the connection registry from connect until disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
    pub client_descriptor: Option<ClientDescriptor>,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        connected_at: Timestamp,
        client_descriptor: Option<ClientDescriptor>,
    ) -> Self {
        Self {
            id,
            connected_at,
            client_descriptor,
        }
    }
}

/// One chat payload, inbound or outbound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: ChatText,
    pub sender: Sender,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(id: MessageId, text: ChatText, sender: Sender, timestamp: Timestamp) -> Self {
        Self {
            id,
            text,
            sender,
            timestamp,
        }
    }
}
