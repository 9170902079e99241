//! Server configuration.
//!
//! Built by the binary from CLI flags and environment variables and handed to
//! the server at construction. Nothing below this module reads the
//! environment.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS (the frontend URL)
    pub allowed_origin: String,
    /// How often the server pings each connection
    pub heartbeat_interval: Duration,
    /// Silence after which a connection is considered dead
    pub heartbeat_timeout: Duration,
    /// Messages kept in the in-memory history; 0 disables the store
    pub history_capacity: usize,
    /// Deployment label reported by the info endpoints
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            allowed_origin: "http://localhost:5173".to_string(),
            heartbeat_interval: Duration::from_secs(25),
            heartbeat_timeout: Duration::from_secs(60),
            history_capacity: 1000,
            environment: "development".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr(), "127.0.0.1:3001");
        assert!(config.heartbeat_timeout > config.heartbeat_interval);
    }
}
