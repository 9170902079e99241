//! Shared application state.

use std::sync::Arc;

use crate::{config::ServerConfig, usecase::Relay};

pub struct AppState {
    pub relay: Arc<Relay>,
    pub config: Arc<ServerConfig>,
}
