//! Request handlers.

pub mod http;
pub mod websocket;

pub use http::{api_not_found, health_check, info, root, stats};
pub use websocket::websocket_handler;
