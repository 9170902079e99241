//! UseCase layer errors.

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Why an inbound chat message was not relayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// Empty, whitespace-only or oversized text. Discarded without telling the sender.
    #[error("malformed message: {0}")]
    MalformedMessage(#[from] ValueObjectError),
}
