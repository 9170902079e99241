//! Value objects.
//!
//! Each value object validates itself on construction, so holding one means
//! the invariant already holds.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Opaque identifier of one live transport connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Uuid> for ConnectionId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client software identifier supplied at connect time (the `User-Agent`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientDescriptor(String);

impl ClientDescriptor {
    /// Returns `None` for a blank descriptor, which is treated as absent.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Chat text: trimmed, non-empty and at most [`ChatText::MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatText(String);

impl ChatText {
    pub const MAX_CHARS: usize = 1000;

    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueObjectError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyText);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_CHARS {
            return Err(ValueObjectError::TextTooLong {
                length,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ChatText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Who a message is attributed to. A closed tag, not an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Admin,
    System,
}

/// Message identifier, used only for display ordering on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_text_is_trimmed() {
        // given:
        let raw = "  hello there \n";

        // when:
        let text = ChatText::new(raw).unwrap();

        // then:
        assert_eq!(text.as_str(), "hello there");
    }

    #[test]
    fn test_chat_text_rejects_empty_and_whitespace() {
        assert_eq!(ChatText::new(""), Err(ValueObjectError::EmptyText));
        assert_eq!(ChatText::new("   "), Err(ValueObjectError::EmptyText));
        assert_eq!(ChatText::new("\t\n"), Err(ValueObjectError::EmptyText));
    }

    #[test]
    fn test_chat_text_length_is_bounded_in_characters() {
        // given: multi-byte characters, exactly at the limit
        let at_limit = "あ".repeat(ChatText::MAX_CHARS);
        let over_limit = "a".repeat(ChatText::MAX_CHARS + 1);

        // then:
        assert!(ChatText::new(&at_limit).is_ok());
        assert_eq!(
            ChatText::new(&over_limit),
            Err(ValueObjectError::TextTooLong {
                length: ChatText::MAX_CHARS + 1,
                max: ChatText::MAX_CHARS,
            })
        );
    }

    #[test]
    fn test_connection_id_rejects_blank() {
        assert!(ConnectionId::new(String::new()).is_err());
        assert!(ConnectionId::try_from("  ".to_string()).is_err());
        assert_eq!(
            ConnectionId::new("abc".to_string()).unwrap().as_str(),
            "abc"
        );
    }

    #[test]
    fn test_client_descriptor_blank_is_absent() {
        assert_eq!(ClientDescriptor::parse("   "), None);
        assert_eq!(
            ClientDescriptor::parse(" curl/8.0 ").unwrap().as_str(),
            "curl/8.0"
        );
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Sender::System).unwrap(), "\"system\"");
        assert_eq!(
            serde_json::from_str::<Sender>("\"user\"").unwrap(),
            Sender::User
        );
    }
}
