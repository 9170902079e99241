//! Bounded in-memory chat history.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageStore, PersistenceError};

/// Keeps the most recent `capacity` messages; the oldest is evicted first.
pub struct InMemoryMessageStore {
    capacity: usize,
    messages: Mutex<VecDeque<ChatMessage>>,
}

impl InMemoryMessageStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            messages: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
        }
    }

    /// Snapshot of the held messages, oldest first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.iter().cloned().collect()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn record(&self, message: &ChatMessage) -> Result<(), PersistenceError> {
        if self.capacity == 0 {
            return Err(PersistenceError::Unavailable(
                "history capacity is zero".to_string(),
            ));
        }
        let mut messages = self.messages.lock().await;
        while messages.len() >= self.capacity {
            messages.pop_front();
        }
        messages.push_back(message.clone());
        Ok(())
    }

    async fn stored_count(&self) -> usize {
        self.messages.lock().await.len()
    }
}
