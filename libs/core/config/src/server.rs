use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for draining requests and closing pools on shutdown
    pub shutdown_timeout: Duration,
    /// Comma-separated CORS origins; `None` allows any origin
    pub cors_allowed_origin: Option<String>,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    /// - SHUTDOWN_TIMEOUT_SECS: defaults to 30
    /// - CORS_ALLOWED_ORIGIN: optional
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_or("PORT", 8080u16)?;
        let shutdown_timeout = Duration::from_secs(env_parse_or("SHUTDOWN_TIMEOUT_SECS", 30u64)?);
        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|origins| !origins.trim().is_empty());

        Ok(Self {
            host,
            port,
            shutdown_timeout,
            cors_allowed_origin,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origin: None,
        }
    }
}
