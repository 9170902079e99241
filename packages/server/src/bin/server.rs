//! Support relay server.
//!
//! Greets every live-chat connection, answers each message with a delayed
//! canned reply and fans typing / leave presence out to the other visitors.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin support-relay-server
//! cargo run --bin support-relay-server -- --host 0.0.0.0 --port 3001
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use support_relay_server::{
    config::ServerConfig,
    domain::{AutoReplyPolicy, MessageStore},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRegistry, InMemoryMessageStore},
    },
    ui::Server,
    usecase::Relay,
};
use support_relay_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "support-relay-server")]
#[command(about = "Live-chat support relay with auto-replies and presence", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "RELAY_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Origin allowed by CORS
    #[arg(long, env = "FRONTEND_URL", default_value = "http://localhost:5173")]
    allowed_origin: String,

    /// Seconds between server pings
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..))]
    heartbeat_interval_secs: u64,

    /// Seconds of client silence before the connection is closed
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..))]
    heartbeat_timeout_secs: u64,

    /// Chat messages kept in memory (0 disables the message store)
    #[arg(long, default_value = "1000")]
    history_capacity: usize,

    /// Deployment environment label
    #[arg(long, env = "APP_ENV", default_value = "development")]
    environment: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            allowed_origin: args.allowed_origin,
            heartbeat_interval: Duration::from_secs(args.heartbeat_interval_secs),
            heartbeat_timeout: Duration::from_secs(args.heartbeat_timeout_secs),
            history_capacity: args.history_capacity,
            environment: args.environment,
        }
    }
}

#[tokio::main]
async fn main() {
    setup_logger(&[env!("CARGO_BIN_NAME"), "tower_http"], "info");

    let config = ServerConfig::from(Args::parse());

    // 1. Registry and message store
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let message_store: Option<Arc<dyn MessageStore>> = if config.history_capacity > 0 {
        tracing::info!(
            "Keeping up to {} messages in memory",
            config.history_capacity
        );
        Some(Arc::new(InMemoryMessageStore::new(config.history_capacity)))
    } else {
        tracing::warn!("Message store disabled, running memory-only");
        None
    };

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Relay (use cases)
    let relay = Arc::new(Relay::new(
        registry,
        message_pusher,
        message_store,
        Arc::new(SystemClock),
        AutoReplyPolicy::default(),
    ));

    // 4. Server
    let server = Server::new(relay, config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("support-relay-server").chain(extra.iter().copied()))
    }

    #[test]
    fn test_defaults_map_into_config() {
        let config = ServerConfig::from(parse(&[]).unwrap());

        assert_eq!(config.heartbeat_interval, Duration::from_secs(25));
        assert_eq!(config.heartbeat_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_heartbeat_values_are_rejected() {
        // テスト項目: 0 秒の heartbeat 設定は起動時に拒否される
        assert!(parse(&["--heartbeat-interval-secs", "0"]).is_err());
        assert!(parse(&["--heartbeat-timeout-secs", "0"]).is_err());
        assert!(parse(&["--heartbeat-interval-secs", "1", "--heartbeat-timeout-secs", "1"]).is_ok());
    }
}
