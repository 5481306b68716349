//! Productos API routes

use axum::Router;
use domain_productos::{PgProductoRepository, ProductoService, handlers};

use crate::state::AppState;

/// Create productos router backed by PostgreSQL
pub fn router(state: &AppState) -> Router {
    let repository = PgProductoRepository::new(state.db.clone());
    let service = ProductoService::new(repository);
    handlers::router(service)
}
