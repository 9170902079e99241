//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object whose `type` field names the event.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::Sender;

/// Outbound event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    WelcomeMessage,
    ChatMessage,
    TypingIndicator,
    PresenceLeave,
    ConnectionInfo,
}

/// `welcome-message` and `chat-message` frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageFrame {
    pub r#type: MessageType,
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    /// Display-formatted time of emission
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingIndicatorFrame {
    pub r#type: MessageType,
    pub is_typing: bool,
    /// Connection id of the typist
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceLeaveFrame {
    pub r#type: MessageType,
    pub user_id: String,
    pub active_connections: usize,
    /// RFC 3339
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfoFrame {
    pub r#type: MessageType,
    pub connection_id: String,
    pub active_connections: usize,
    /// RFC 3339
    pub server_time: String,
}

/// Frames a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientFrame {
    ChatMessage(ChatMessagePayload),
    Typing(TypingPayload),
    GetConnectionInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessagePayload {
    /// Missing or null text decodes as empty and is discarded by the session
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypingPayload {
    #[serde(rename = "isTyping", default, deserialize_with = "coerce_bool")]
    pub is_typing: bool,
}

/// Loose truthiness for the typing flag.
///
/// `false`, `0`, `null`, `""`, `"false"` and `"0"` are false; everything else is true.
fn coerce_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.trim(), "" | "false" | "0"),
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_message_frame() {
        // given:
        let raw = r#"{"type":"chat-message","text":"hello","sender":"user"}"#;

        // when:
        let frame: ClientFrame = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            frame,
            ClientFrame::ChatMessage(ChatMessagePayload {
                text: Some("hello".to_string()),
                sender: Some("user".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_chat_message_without_text() {
        let frame: ClientFrame = serde_json::from_str(r#"{"type":"chat-message"}"#).unwrap();
        assert_eq!(
            frame,
            ClientFrame::ChatMessage(ChatMessagePayload {
                text: None,
                sender: None,
            })
        );

        let frame: ClientFrame =
            serde_json::from_str(r#"{"type":"chat-message","text":null}"#).unwrap();
        assert!(matches!(
            frame,
            ClientFrame::ChatMessage(ChatMessagePayload { text: None, .. })
        ));
    }

    #[test]
    fn test_parse_typing_coerces_flag() {
        let parse = |raw: &str| match serde_json::from_str::<ClientFrame>(raw).unwrap() {
            ClientFrame::Typing(payload) => payload.is_typing,
            other => panic!("unexpected frame: {other:?}"),
        };

        assert!(parse(r#"{"type":"typing","isTyping":true}"#));
        assert!(!parse(r#"{"type":"typing","isTyping":false}"#));
        assert!(parse(r#"{"type":"typing","isTyping":1}"#));
        assert!(!parse(r#"{"type":"typing","isTyping":0}"#));
        assert!(parse(r#"{"type":"typing","isTyping":"true"}"#));
        assert!(!parse(r#"{"type":"typing","isTyping":"false"}"#));
        assert!(!parse(r#"{"type":"typing","isTyping":null}"#));
        assert!(!parse(r#"{"type":"typing"}"#));
    }

    #[test]
    fn test_parse_get_connection_info() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"type":"get-connection-info"}"#).unwrap();
        assert_eq!(frame, ClientFrame::GetConnectionInfo);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"type":"shout","text":"x"}"#).is_err());
        assert!(serde_json::from_str::<ClientFrame>("hello").is_err());
    }

    #[test]
    fn test_typing_indicator_frame_uses_camel_case() {
        // given:
        let frame = TypingIndicatorFrame {
            r#type: MessageType::TypingIndicator,
            is_typing: true,
            user_id: "abc".to_string(),
        };

        // when:
        let json: Value = serde_json::to_value(&frame).unwrap();

        // then:
        assert_eq!(
            json,
            serde_json::json!({"type": "typing-indicator", "isTyping": true, "userId": "abc"})
        );
    }
}
