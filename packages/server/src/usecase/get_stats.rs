//! UseCase: 統計情報の取得（読み取り専用）

use std::{sync::Arc, time::Duration};

use tokio::time::Instant;

use crate::domain::{ConnectionRegistry, MessageStore};

/// Snapshot reported by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayStats {
    pub active_connections: usize,
    pub stored_messages: usize,
    pub storage_enabled: bool,
    pub uptime: Duration,
}

pub struct GetStatsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_store: Option<Arc<dyn MessageStore>>,
    started_at: Instant,
}

impl GetStatsUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_store: Option<Arc<dyn MessageStore>>,
    ) -> Self {
        Self {
            registry,
            message_store,
            started_at: Instant::now(),
        }
    }

    pub async fn execute(&self) -> RelayStats {
        let stored_messages = match &self.message_store {
            Some(store) => store.stored_count().await,
            None => 0,
        };
        RelayStats {
            active_connections: self.registry.count().await,
            stored_messages,
            storage_enabled: self.message_store.is_some(),
            uptime: self.started_at.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Connection, ConnectionId, Timestamp},
        infrastructure::repository::InMemoryConnectionRegistry,
    };

    #[tokio::test(start_paused = true)]
    async fn test_stats_reflect_registry_and_uptime() {
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = GetStatsUseCase::new(registry.clone(), None);
        registry
            .register(Connection::new(
                ConnectionId::new("alice".to_string()).unwrap(),
                Timestamp::new(0),
                None,
            ))
            .await
            .unwrap();

        // when (操作):
        tokio::time::advance(Duration::from_secs(90)).await;
        let stats = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(stats.active_connections, 1);
        assert_eq!(stats.stored_messages, 0);
        assert!(!stats.storage_enabled);
        assert!(stats.uptime >= Duration::from_secs(90));
    }
}
