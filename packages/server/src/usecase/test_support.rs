//! Test doubles shared by the use case tests.

use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PusherChannel};

/// Spy pusher: records every attempted write, successful or not.
#[derive(Default)]
pub struct RecordingPusher {
    registered: Mutex<HashSet<ConnectionId>>,
    delivered: Mutex<Vec<(ConnectionId, OutboundEvent)>>,
    attempts: Mutex<Vec<ConnectionId>>,
}

impl RecordingPusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events delivered to `id`, in order.
    pub fn delivered_to(&self, id: &ConnectionId) -> Vec<OutboundEvent> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .filter(|(target, _)| target == id)
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Every write attempted against `id`, including ones rejected because it was closed.
    pub fn attempts_for(&self, id: &ConnectionId) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|target| *target == id)
            .count()
    }

    fn deliver(&self, target: &ConnectionId, event: &OutboundEvent) -> Result<(), MessagePushError> {
        self.attempts.lock().unwrap().push(target.clone());
        if !self.registered.lock().unwrap().contains(target) {
            return Err(MessagePushError::ConnectionNotFound(target.to_string()));
        }
        self.delivered
            .lock()
            .unwrap()
            .push((target.clone(), event.clone()));
        Ok(())
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, connection_id: ConnectionId, _sender: PusherChannel) {
        self.registered.lock().unwrap().insert(connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.registered.lock().unwrap().remove(connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        self.deliver(connection_id, event)
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        for target in &targets {
            let _ = self.deliver(target, event);
        }
        Ok(())
    }
}
