//! Relay Session: protocol behavior of one connection, connect to disconnect.
//!
//! ```text
//! Connecting ──open──▶ Active ──close──▶ Closed
//!                       │  ▲
//!                       └──┘ chat / typing / get-connection-info
//! ```
//!
//! `Closed` is terminal: events handled afterwards are ignored and nothing is
//! emitted for the connection again.

use std::sync::Arc;

use crate::domain::{
    ChatMessage, ChatText, ClientDescriptor, ConnectionId, InboundEvent, OutboundEvent,
    PusherChannel, Sender, Timestamp,
};

use super::{error::SendMessageError, relay::Relay, send_message::SentMessage};

/// Greeting pushed to every connection once it becomes active.
pub const WELCOME_TEXT: &str = "Welcome to our support chat! How can we help you today?";

/// States a session can be observed in. Connecting is the `open` call
/// itself: a `RelaySession` only exists once its connection is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Closed,
}

/// What handling one inbound event amounted to.
#[derive(Debug)]
pub enum Handled {
    /// Valid chat message, with its pending reply if one was scheduled.
    Relayed(SentMessage),
    /// Malformed chat message, dropped without telling the sender.
    Discarded,
    /// Typing indicator or connection-info request served.
    Served,
    /// The session is not active.
    Ignored,
}

pub struct RelaySession {
    relay: Arc<Relay>,
    connection_id: ConnectionId,
    state: SessionState,
}

impl RelaySession {
    /// Register a new connection and greet it.
    pub async fn open(
        relay: Arc<Relay>,
        client_descriptor: Option<ClientDescriptor>,
        sender: PusherChannel,
    ) -> Self {
        let connection = relay.connect.execute(client_descriptor, sender).await;
        let session = Self {
            relay,
            connection_id: connection.id,
            state: SessionState::Active,
        };
        session.send_welcome().await;
        session
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    async fn send_welcome(&self) {
        let now = Timestamp::new(self.relay.clock.now_millis());
        let Ok(text) = ChatText::new(WELCOME_TEXT) else {
            return;
        };
        let welcome = ChatMessage::new(self.relay.message_ids.next(now), text, Sender::System, now);
        if let Err(e) = self
            .relay
            .message_pusher
            .push_to(&self.connection_id, &OutboundEvent::Welcome(welcome))
            .await
        {
            tracing::warn!("Failed to send welcome to '{}': {}", self.connection_id, e);
        }
    }

    pub async fn handle(&mut self, event: InboundEvent) -> Handled {
        if self.state != SessionState::Active {
            tracing::debug!(
                "Ignoring {:?} for '{}' in state {:?}",
                event,
                self.connection_id,
                self.state
            );
            return Handled::Ignored;
        }

        match event {
            InboundEvent::Chat { text, sender } => {
                match self
                    .relay
                    .send_message
                    .execute(&self.connection_id, &text, sender.as_deref())
                    .await
                {
                    Ok(sent) => Handled::Relayed(sent),
                    Err(SendMessageError::MalformedMessage(reason)) => {
                        tracing::debug!(
                            "Discarding message from '{}': {}",
                            self.connection_id,
                            reason
                        );
                        Handled::Discarded
                    }
                }
            }
            InboundEvent::Typing { is_typing } => {
                self.relay
                    .presence
                    .broadcast_typing(&self.connection_id, is_typing)
                    .await;
                Handled::Served
            }
            InboundEvent::ConnectionInfoRequest => {
                if let Err(e) = self.relay.connection_info.execute(&self.connection_id).await {
                    tracing::warn!(
                        "Failed to send connection info to '{}': {}",
                        self.connection_id,
                        e
                    );
                }
                Handled::Served
            }
        }
    }

    /// Move to `Closed`. Returns `false` if the session was already closed.
    pub async fn close(&mut self) -> bool {
        if self.state == SessionState::Closed {
            return false;
        }
        self.state = SessionState::Closed;
        self.relay.disconnect.execute(&self.connection_id).await;
        true
    }
}
