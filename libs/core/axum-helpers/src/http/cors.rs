use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// Creates the CORS layer for API services.
///
/// `allowed_origins` is a comma-separated list such as
/// `http://localhost:3000,https://example.com`. `None` allows any origin.
///
/// Both variants allow GET, POST, PUT, DELETE (plus OPTIONS for preflight),
/// the Content-Type and Accept headers, and cache preflights for one hour.
///
/// # Errors
/// Returns `InvalidInput` if an origin is not a valid header value or the
/// list contains no origins.
pub fn create_cors_layer(allowed_origins: Option<&str>) -> io::Result<CorsLayer> {
    let allow_origin = match allowed_origins {
        None => {
            info!("CORS configured to allow any origin");
            AllowOrigin::any()
        }
        Some(origins_str) => {
            let origins = origins_str
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| {
                    origin.parse::<HeaderValue>().map_err(|e| {
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!("Invalid CORS origin '{}': {}", origin, e),
                        )
                    })
                })
                .collect::<io::Result<Vec<_>>>()?;

            if origins.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "CORS_ALLOWED_ORIGIN cannot be empty",
                ));
            }

            info!("CORS configured with allowed origins: {}", origins_str);
            AllowOrigin::list(origins)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}
