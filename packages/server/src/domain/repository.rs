//! Storage seams of the relay.

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Connection},
    error::{PersistenceError, RegistryError},
    value_object::ConnectionId,
};

/// The authoritative set of live connections.
///
/// It never sends anything itself; broadcasting is built on top of
/// [`ConnectionRegistry::for_each_except`].
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Add an entry. Fails if the id is already present.
    async fn register(&self, connection: Connection) -> Result<(), RegistryError>;

    /// Remove an entry. Removing an absent id is a no-op and returns `None`.
    async fn unregister(&self, id: &ConnectionId) -> Option<Connection>;

    async fn get(&self, id: &ConnectionId) -> Option<Connection>;

    /// Number of live connections.
    async fn count(&self) -> usize;

    /// Invoke `f` for every live connection other than `id`, in no particular order.
    async fn for_each_except(
        &self,
        id: &ConnectionId,
        f: &mut (dyn for<'a> FnMut(&'a Connection) + Send),
    );
}

/// Persistence collaborator for chat messages. Best effort only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn record(&self, message: &ChatMessage) -> Result<(), PersistenceError>;

    /// Number of messages currently held.
    async fn stored_count(&self) -> usize;
}
