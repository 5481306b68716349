//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers
//! - Stamping the request path into error bodies
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers, stamp_error_path};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(stamp_error_path))
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(config.cors_allowed_origin.as_deref())?);
//! ```

pub mod cors;
pub mod error_path;
pub mod security;

pub use cors::create_cors_layer;
pub use error_path::stamp_error_path;
pub use security::security_headers;
