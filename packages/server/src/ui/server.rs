//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::ServerConfig, usecase::Relay};

use super::{
    handler::{api_not_found, health_check, info, root, stats, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Support relay server
///
/// Owns the wired [`Relay`] and the [`ServerConfig`] it was built with.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(relay, config);
/// server.run().await?;
/// ```
pub struct Server {
    relay: Arc<Relay>,
    config: Arc<ServerConfig>,
}

impl Server {
    pub fn new(relay: Arc<Relay>, config: ServerConfig) -> Self {
        Self {
            relay,
            config: Arc::new(config),
        }
    }

    /// Build the router with every endpoint, CORS and request tracing.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            relay: self.relay.clone(),
            config: self.config.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(root))
            .route("/api/health", get(health_check))
            .route("/api/info", get(info))
            .route("/api/stats", get(stats))
            .fallback(api_not_found)
            .layer(cors_layer(&self.config.allowed_origin))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Support relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Allowed origin: {}", self.config.allowed_origin);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            // No origin is allowed rather than falling back to a wildcard
            tracing::warn!("Invalid allowed origin '{}': {}", allowed_origin, e);
            layer
        }
    }
}
