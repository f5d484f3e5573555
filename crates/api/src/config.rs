//! Runtime settings for the HTTP server.

use std::time::Duration;

/// Where to listen and how long a single request may run.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `host:port` to bind.
    pub bind: String,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, request_timeout: Duration) -> Self {
        Self {
            bind: format!("{host}:{port}"),
            request_timeout,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", 8080, Duration::from_secs(30))
    }
}
