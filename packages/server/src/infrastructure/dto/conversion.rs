//! Conversion logic between DTOs and domain events.

use support_relay_shared::time::{timestamp_to_display_time, timestamp_to_rfc3339};

use crate::domain::{ChatMessage, InboundEvent, OutboundEvent};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientFrame> for InboundEvent {
    fn from(frame: dto::ClientFrame) -> Self {
        match frame {
            dto::ClientFrame::ChatMessage(payload) => Self::Chat {
                text: payload.text.unwrap_or_default(),
                sender: payload.sender,
            },
            dto::ClientFrame::Typing(payload) => Self::Typing {
                is_typing: payload.is_typing,
            },
            dto::ClientFrame::GetConnectionInfo => Self::ConnectionInfoRequest,
        }
    }
}

/// Decode one inbound text frame.
pub fn decode_client_frame(text: &str) -> Result<InboundEvent, serde_json::Error> {
    serde_json::from_str::<dto::ClientFrame>(text).map(Into::into)
}

// ========================================
// Domain → DTO
// ========================================

fn chat_frame(r#type: dto::MessageType, message: &ChatMessage) -> dto::ChatMessageFrame {
    dto::ChatMessageFrame {
        r#type,
        id: message.id.value(),
        text: message.text.as_str().to_string(),
        sender: message.sender,
        timestamp: timestamp_to_display_time(message.timestamp.value()),
    }
}

/// Encode an outbound event as a JSON text frame.
pub fn encode_event(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    match event {
        OutboundEvent::Welcome(message) => {
            serde_json::to_string(&chat_frame(dto::MessageType::WelcomeMessage, message))
        }
        OutboundEvent::Chat(message) => {
            serde_json::to_string(&chat_frame(dto::MessageType::ChatMessage, message))
        }
        OutboundEvent::Typing { user_id, is_typing } => {
            serde_json::to_string(&dto::TypingIndicatorFrame {
                r#type: dto::MessageType::TypingIndicator,
                is_typing: *is_typing,
                user_id: user_id.as_str().to_string(),
            })
        }
        OutboundEvent::PresenceLeave {
            user_id,
            active_connections,
            at,
        } => serde_json::to_string(&dto::PresenceLeaveFrame {
            r#type: dto::MessageType::PresenceLeave,
            user_id: user_id.as_str().to_string(),
            active_connections: *active_connections,
            timestamp: timestamp_to_rfc3339(at.value()),
        }),
        OutboundEvent::ConnectionInfo {
            connection_id,
            active_connections,
            server_time,
        } => serde_json::to_string(&dto::ConnectionInfoFrame {
            r#type: dto::MessageType::ConnectionInfo,
            connection_id: connection_id.as_str().to_string(),
            active_connections: *active_connections,
            server_time: timestamp_to_rfc3339(server_time.value()),
        }),
    }
}
