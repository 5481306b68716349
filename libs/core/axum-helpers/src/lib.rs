//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers, error path stamping)
//! - **[`errors`]**: The uniform JSON error body and `AppError`
//! - **[`extractors`]**: Custom extractors (numeric id path, validated JSON)
//! - **[`formats`]**: Wire formats shared by response bodies
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config)?;
//!     create_production_app(router, &config, async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod formats;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers, stamp_error_path};

// Re-export error types
pub use errors::{AppError, ErrorResponse, validation_messages};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};
