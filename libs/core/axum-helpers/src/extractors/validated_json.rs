//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Malformed JSON and failed `Validate` checks both reject with a 400
/// [`AppError`]; validation failures carry one message per invalid field.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct NuevoProducto {
///     #[validate(length(min = 2, max = 100))]
///     nombre: String,
/// }
///
/// async fn crear(ValidatedJson(payload): ValidatedJson<NuevoProducto>) -> String {
///     format!("Creando {}", payload.nombre)
/// }
///
/// let app = Router::new().route("/productos", post(crear));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
