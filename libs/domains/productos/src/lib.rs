//! Productos Domain
//!
//! CRUD, name search and price-range queries over the `productos` table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/api/v1/productos)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, timestamps, not-found checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, domain struct, request/response DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_productos::{handlers, InMemoryProductoRepository, ProductoService};
//!
//! let service = ProductoService::new(InMemoryProductoRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductoError, ProductoResult};
pub use handlers::ApiDoc;
pub use models::{NewProducto, Producto, ProductoRequest, ProductoResponse};
pub use postgres::PgProductoRepository;
pub use repository::{InMemoryProductoRepository, ProductoRepository};
pub use service::ProductoService;
