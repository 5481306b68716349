//! Numeric id path parameter extractor.

use crate::errors::{AppError, messages};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for `i64` path ids such as `/productos/{id}`.
///
/// A non-numeric id is a 400 naming the parameter and its expected type.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_producto(IdPath(id): IdPath) -> String {
///     format!("Producto {}", id)
/// }
///
/// let app = Router::new().route("/productos/{id}", get(get_producto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        raw.trim()
            .parse::<i64>()
            .map(IdPath)
            .map_err(|_| AppError::BadRequest(messages::type_mismatch("id", "entero")))
    }
}
