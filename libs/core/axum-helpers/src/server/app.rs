use super::shutdown::ShutdownCoordinator;
use crate::errors::{AppError, messages};
use crate::http::{create_cors_layer, security_headers, stamp_error_path};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Fallback for unknown routes: 404 with the uniform error body.
pub async fn not_found() -> AppError {
    AppError::NotFound(messages::ROUTE_NOT_FOUND.to_string())
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - Swagger UI at `/swagger-ui`, OpenAPI JSON at `/api-docs/openapi.json`
/// - API routes nested under `/api`
/// - 404 and 405 fallbacks returning the uniform error body
/// - Middleware: error path stamping, tracing, security headers, CORS, compression
///
/// Health endpoints (`/health`, `/ready`) are merged by the app with
/// [`super::health_router`] and its own readiness handler.
///
/// # Errors
/// Returns `InvalidInput` when `cors_allowed_origin` holds an invalid origin.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/v1/productos", productos::router(service));
/// let router = create_router::<ApiDoc>(api_routes, &config.server)?;
/// ```
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(server_config.cors_allowed_origin.as_deref())?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn(stamp_error_path))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup`.
///
/// In-flight requests are drained before the server future resolves. The
/// cleanup task (closing pools and the like) is bounded by
/// `server_config.shutdown_timeout`; exceeding it is logged and shutdown
/// continues.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config.server, cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();
    let cleanup_signal = coordinator.clone();
    let shutdown_timeout = server_config.shutdown_timeout;

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        cleanup_signal.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    if let Err(e) = cleanup_handle.await {
        warn!("Cleanup task failed: {}", e);
    }

    serve_result
}
