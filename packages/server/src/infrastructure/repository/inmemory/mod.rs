//! In-memory implementations of the relay's storage seams.

mod connection;
mod message_store;

pub use connection::InMemoryConnectionRegistry;
pub use message_store::InMemoryMessageStore;
