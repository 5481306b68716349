//! PostgreSQL connection management for the productos service.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::postgres::{PostgresConfig, connect_from_config_with_retry, run_migrations};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = connect_from_config_with_retry(config, RetryConfig::default()).await?;
//! run_migrations::<Migrator>(&db, "productos_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
