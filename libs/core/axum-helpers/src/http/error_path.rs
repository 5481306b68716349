use crate::errors::ErrorResponse;
use axum::{
    extract::{OriginalUri, Request},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Middleware that writes the request path into [`ErrorResponse`] bodies.
///
/// Error responses carry their body as a response extension; when its `path`
/// differs from the request path, the body is re-serialized with the full
/// path (taken from `OriginalUri`, so nested routers still report
/// `/api/v1/...`). Other responses pass through untouched.
pub async fn stamp_error_path(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    let Some(error) = response.extensions().get::<ErrorResponse>() else {
        return response;
    };
    if error.path == path {
        return response;
    }

    let stamped = error.clone().with_path(path);
    let (parts, _) = response.into_parts();
    let mut rebuilt = stamped.into_response();

    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_LENGTH && !rebuilt.headers().contains_key(name) {
            rebuilt.headers_mut().insert(name, value.clone());
        }
    }

    rebuilt
}
