use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs readiness checks concurrently and aggregates them into one JSON body.
///
/// Returns 200 with `"status": "ready"` when every check passes, otherwise
/// 503 with `"status": "not ready"`. Each check is reported as `connected` or
/// `disconnected` under its name.
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![(
///     "database",
///     Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) }),
/// )];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut services = Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(()) => {
                services.insert(name.to_string(), json!("connected"));
            }
            Err(e) => {
                tracing::error!(check = name, error = %e, "Readiness check failed");
                services.insert(name.to_string(), json!("disconnected"));
                all_healthy = false;
            }
        }
    }

    services.insert(
        "status".to_string(),
        json!(if all_healthy { "ready" } else { "not ready" }),
    );
    let body = Json(Value::Object(services));

    if all_healthy {
        Ok((StatusCode::OK, body))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, body))
    }
}

/// Liveness handler: always 200 while the process is serving requests.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Creates a router with the `/health` endpoint.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::health_router;
/// use core_config::app_info;
///
/// let app = Router::new()
///     .merge(health_router(app_info!()))
///     .merge(ready_router(state));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
