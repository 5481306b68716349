//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
