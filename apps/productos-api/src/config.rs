//! Configuration for Productos API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            database: PostgresConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
