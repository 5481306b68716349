//! API routes module

pub mod health;
pub mod productos;

use axum::Router;
use axum_helpers::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes (mounted under `/api` by `create_router`)
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/v1/productos", productos::router(state))
}

/// Full application: API, documentation, liveness and readiness
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone())))
}
