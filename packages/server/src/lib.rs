//! Live-chat support relay.
//!
//! Tracks live WebSocket connections, greets each one, answers every valid
//! chat message with a delayed canned reply, and fans typing and leave
//! presence events out to the other connections.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
