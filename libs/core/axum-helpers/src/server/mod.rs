//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - Health endpoint and readiness check aggregation
//! - Graceful shutdown coordination with bounded cleanup
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{server::ServerConfig, app_info};
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes, &config)?
//!     .merge(health_router(app_info!()));
//!
//! create_production_app(router, &config, async move { db.close().await.ok(); }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router, method_not_allowed, not_found};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
