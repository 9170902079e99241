//! Events crossing the relay boundary.

use super::{
    entity::ChatMessage,
    value_object::{ConnectionId, Timestamp},
};

/// Outbound event, independent of the wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Greeting sent to a connection right after it becomes active.
    Welcome(ChatMessage),
    /// A chat message (the deferred auto-reply).
    Chat(ChatMessage),
    /// Another connection started or stopped typing.
    Typing {
        user_id: ConnectionId,
        is_typing: bool,
    },
    /// Another connection left; `active_connections` is the count after removal.
    PresenceLeave {
        user_id: ConnectionId,
        active_connections: usize,
        at: Timestamp,
    },
    /// Reply to a connection-info request.
    ConnectionInfo {
        connection_id: ConnectionId,
        active_connections: usize,
        server_time: Timestamp,
    },
}

impl OutboundEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome(_) => "welcome-message",
            Self::Chat(_) => "chat-message",
            Self::Typing { .. } => "typing-indicator",
            Self::PresenceLeave { .. } => "presence-leave",
            Self::ConnectionInfo { .. } => "connection-info",
        }
    }
}

/// Inbound event from a connection, already decoded from the wire.
///
/// Chat text is carried raw; validation belongs to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Chat {
        text: String,
        sender: Option<String>,
    },
    Typing {
        is_typing: bool,
    },
    ConnectionInfoRequest,
}
