//! UseCase: メッセージ受信処理
//!
//! 受信テキストを検証し、ストアに記録（ベストエフォート）した上で
//! DeferredResponder に自動返信を予約します。

use std::sync::Arc;

use support_relay_shared::time::Clock;
use tokio::task::JoinHandle;

use crate::domain::{
    ChatMessage, ChatText, ConnectionId, MessageIdFactory, MessageStore, Sender, Timestamp,
};

use super::{
    deferred_responder::{DeferredResponder, ReplyOutcome},
    error::SendMessageError,
};

/// Result of relaying one valid message.
#[derive(Debug)]
pub struct SentMessage {
    pub message: ChatMessage,
    /// `None` if the connection closed before the reply could be scheduled.
    pub reply: Option<JoinHandle<ReplyOutcome>>,
}

/// メッセージ受信のユースケース
pub struct SendMessageUseCase {
    message_store: Option<Arc<dyn MessageStore>>,
    responder: Arc<DeferredResponder>,
    clock: Arc<dyn Clock>,
    message_ids: Arc<MessageIdFactory>,
}

impl SendMessageUseCase {
    pub fn new(
        message_store: Option<Arc<dyn MessageStore>>,
        responder: Arc<DeferredResponder>,
        clock: Arc<dyn Clock>,
        message_ids: Arc<MessageIdFactory>,
    ) -> Self {
        Self {
            message_store,
            responder,
            clock,
            message_ids,
        }
    }

    /// Validate and relay a chat message from `origin`.
    ///
    /// The claimed sender is not trusted: inbound messages are always
    /// attributed to `user`.
    pub async fn execute(
        &self,
        origin: &ConnectionId,
        text: &str,
        claimed_sender: Option<&str>,
    ) -> Result<SentMessage, SendMessageError> {
        let text = ChatText::new(text)?;

        if let Some(claimed) = claimed_sender.filter(|s| *s != "user") {
            tracing::debug!("Ignoring claimed sender '{}' from '{}'", claimed, origin);
        }

        let now = Timestamp::new(self.clock.now_millis());
        let message = ChatMessage::new(self.message_ids.next(now), text, Sender::User, now);
        tracing::info!("Message received from '{}': {}", origin, message.text.as_str());

        match &self.message_store {
            Some(store) => {
                if let Err(e) = store.record(&message).await {
                    tracing::warn!("Continuing without persistence: {}", e);
                }
            }
            None => tracing::debug!("No message store configured; message not recorded"),
        }

        let reply = self.responder.schedule(origin).await;
        Ok(SentMessage { message, reply })
    }
}
