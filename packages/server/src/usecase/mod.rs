//! UseCase layer.
//!
//! - `RelaySession`: per-connection state machine driving the use cases
//! - `DeferredResponder`, `PresenceBroadcaster`: the two emitters
//! - `Connect`, `SendMessage`, `Disconnect`, `GetConnectionInfo`, `GetStats`
//! - `Relay`: wires them around one registry and one pusher

mod connect;
mod connection_info;
mod deferred_responder;
mod disconnect;
pub mod error;
mod get_stats;
mod presence;
mod relay;
mod send_message;
mod session;
#[cfg(test)]
mod test_support;

pub use connect::ConnectUseCase;
pub use connection_info::GetConnectionInfoUseCase;
pub use deferred_responder::{DeferredResponder, ReplyOutcome};
pub use disconnect::DisconnectUseCase;
pub use error::SendMessageError;
pub use get_stats::{GetStatsUseCase, RelayStats};
pub use presence::PresenceBroadcaster;
pub use relay::Relay;
pub use send_message::{SendMessageUseCase, SentMessage};
pub use session::{Handled, RelaySession, SessionState, WELCOME_TEXT};
