//! Domain layer: value objects, entities, outbound events and the seams the
//! use cases depend on.
//!
//! Infrastructure implements the traits defined here (`ConnectionRegistry`,
//! `MessageStore`, `MessagePusher`); use cases never depend on a concrete
//! implementation.

pub mod auto_reply;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use auto_reply::{AUTO_REPLIES, AutoReplyPolicy};
pub use entity::{ChatMessage, Connection};
pub use error::{MessagePushError, PersistenceError, RegistryError, ValueObjectError};
pub use event::{InboundEvent, OutboundEvent};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ConnectionRegistry, MessageStore};
pub use value_object::{ChatText, ClientDescriptor, ConnectionId, MessageId, Sender, Timestamp};
