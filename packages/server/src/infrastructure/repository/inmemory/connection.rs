//! InMemory Connection Registry 実装
//!
//! ドメイン層が定義する `ConnectionRegistry` trait の具体的な実装。
//! HashMap を接続テーブルとして使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, RegistryError};

/// In-memory connection registry keyed by connection id.
///
/// Constructed once at relay startup and shared (`Arc`) with the use cases.
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: Connection) -> Result<(), RegistryError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&connection.id) {
            return Err(RegistryError::DuplicateConnection(
                connection.id.into_string(),
            ));
        }
        tracing::debug!("Connection '{}' registered", connection.id);
        connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    async fn unregister(&self, id: &ConnectionId) -> Option<Connection> {
        let removed = self.connections.lock().await.remove(id);
        if removed.is_some() {
            tracing::debug!("Connection '{}' unregistered", id);
        }
        removed
    }

    async fn get(&self, id: &ConnectionId) -> Option<Connection> {
        self.connections.lock().await.get(id).cloned()
    }

    async fn count(&self) -> usize {
        self.connections.lock().await.len()
    }

    async fn for_each_except(
        &self,
        id: &ConnectionId,
        f: &mut (dyn for<'a> FnMut(&'a Connection) + Send),
    ) {
        let connections = self.connections.lock().await;
        for connection in connections.values().filter(|c| &c.id != id) {
            f(connection);
        }
    }
}
