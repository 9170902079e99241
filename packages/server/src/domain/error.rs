//! Domain error types.

use thiserror::Error;

/// Value object construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("message text must not be empty")]
    EmptyText,

    #[error("message text is {length} characters, maximum is {max}")]
    TextTooLong { length: usize, max: usize },
}

/// Connection registry invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// Failures writing to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("push failed: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    Serialization(String),
}

/// Failures of the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}
