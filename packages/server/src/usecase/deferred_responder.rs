//! Deferred Responder: one randomized, delayed auto-reply per valid message.
//!
//! Each reply is its own tokio task sleeping on `tokio::time`, so the wait
//! never blocks other connections. Every open connection owns a
//! `CancellationToken`; closing the connection cancels it, which suppresses
//! all of its pending replies. The token is also re-checked when the delay
//! elapses, right before the write.

use std::{collections::HashMap, sync::Arc, time::Duration};

use support_relay_shared::time::Clock;
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::domain::{
    AutoReplyPolicy, ChatMessage, ChatText, ConnectionId, MessageIdFactory, MessagePusher,
    OutboundEvent, Sender, Timestamp,
};

/// How a scheduled reply ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Delivered,
    /// The connection closed before the delay elapsed.
    Cancelled,
    /// The write failed; the reply is dropped.
    Failed,
}

pub struct DeferredResponder {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    message_ids: Arc<MessageIdFactory>,
    policy: AutoReplyPolicy,
    tokens: Mutex<HashMap<ConnectionId, CancellationToken>>,
}

impl DeferredResponder {
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        message_ids: Arc<MessageIdFactory>,
        policy: AutoReplyPolicy,
    ) -> Self {
        Self {
            message_pusher,
            clock,
            message_ids,
            policy,
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Start accepting replies for `connection_id`.
    pub async fn open(&self, connection_id: &ConnectionId) {
        self.tokens
            .lock()
            .await
            .entry(connection_id.clone())
            .or_default();
    }

    /// Cancel every pending reply for `connection_id` and stop accepting new ones.
    ///
    /// Returns `false` if the connection was not open.
    pub async fn cancel_all(&self, connection_id: &ConnectionId) -> bool {
        match self.tokens.lock().await.remove(connection_id) {
            Some(token) => {
                token.cancel();
                tracing::debug!("Cancelled pending replies for '{}'", connection_id);
                true
            }
            None => false,
        }
    }

    /// Number of connections currently accepting replies.
    pub async fn open_connections(&self) -> usize {
        self.tokens.lock().await.len()
    }

    /// Schedule one reply to `connection_id`.
    ///
    /// Returns `None` when the connection is not open or the policy has no
    /// usable reply.
    pub async fn schedule(&self, connection_id: &ConnectionId) -> Option<JoinHandle<ReplyOutcome>> {
        let token = self.tokens.lock().await.get(connection_id)?.clone();

        let (reply, delay) = self.policy.draw(&mut rand::rng())?;
        let text = match ChatText::new(&reply) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Skipping unusable auto-reply {:?}: {}", reply, e);
                return None;
            }
        };

        tracing::debug!(
            "Scheduled reply to '{}' in {}ms",
            connection_id,
            delay.as_millis()
        );

        let task = ReplyTask {
            connection_id: connection_id.clone(),
            text,
            delay,
            token,
            message_pusher: self.message_pusher.clone(),
            clock: self.clock.clone(),
            message_ids: self.message_ids.clone(),
        };
        Some(tokio::spawn(task.run()))
    }
}

struct ReplyTask {
    connection_id: ConnectionId,
    text: ChatText,
    delay: Duration,
    token: CancellationToken,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    message_ids: Arc<MessageIdFactory>,
}

impl ReplyTask {
    async fn run(self) -> ReplyOutcome {
        tokio::select! {
            biased;
            () = self.token.cancelled() => {
                tracing::debug!("Reply to '{}' cancelled", self.connection_id);
                return ReplyOutcome::Cancelled;
            }
            () = tokio::time::sleep(self.delay) => {}
        }

        if self.token.is_cancelled() {
            return ReplyOutcome::Cancelled;
        }

        let now = Timestamp::new(self.clock.now_millis());
        let message = ChatMessage::new(self.message_ids.next(now), self.text, Sender::Admin, now);
        match self
            .message_pusher
            .push_to(&self.connection_id, &OutboundEvent::Chat(message))
            .await
        {
            Ok(()) => ReplyOutcome::Delivered,
            Err(e) => {
                tracing::warn!("Dropping reply to '{}': {}", self.connection_id, e);
                ReplyOutcome::Failed
            }
        }
    }
}
