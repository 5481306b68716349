pub mod messages;
pub mod responses;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDateTime};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Uniform error body returned for every 4xx and 5xx response.
///
/// `path` is filled in by [`crate::http::stamp_error_path`] once the response
/// travels back through the router, so handlers never need the request URI.
///
/// # JSON Example
///
/// ```json
/// {
///   "status": 400,
///   "mensaje": "Error de validación en los datos de entrada",
///   "timestamp": "2024-01-15 10:30:00",
///   "path": "/api/v1/productos",
///   "errores": ["El nombre del producto es obligatorio"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    #[schema(example = 404)]
    pub status: u16,
    /// Human-readable message, safe to show to API consumers
    #[schema(example = "Producto no encontrado con id: '999'")]
    pub mensaje: String,
    #[serde(with = "crate::formats::date_time")]
    #[schema(value_type = String, example = "2024-01-15 10:30:00")]
    pub timestamp: NaiveDateTime,
    /// Request path that produced the error
    #[schema(example = "/api/v1/productos/999")]
    pub path: String,
    /// Per-field messages, present only for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errores: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, mensaje: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            mensaje: mensaje.into(),
            timestamp: Local::now().naive_local(),
            path: String::new(),
            errores: None,
        }
    }

    pub fn with_errores(mut self, errores: Vec<String>) -> Self {
        self.errores = Some(errores);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    /// The body is also stored as a response extension so outer middleware can
    /// rewrite it (see [`crate::http::stamp_error_path`]).
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(&self)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this type; this is the
/// only place a failure becomes a status code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// One message per invalid field
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::JsonExtractorRejection(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation(errores) => {
                tracing::info!(?errores, "Request validation failed");
                ErrorResponse::new(status, messages::VALIDATION_FAILED).with_errores(errores)
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error = %e.body_text(), "Rejected request body");
                ErrorResponse::new(status, messages::INVALID_BODY)
            }
            AppError::BadRequest(mensaje) => {
                tracing::info!(%mensaje, "Bad request");
                ErrorResponse::new(status, mensaje)
            }
            AppError::NotFound(mensaje) => {
                tracing::info!(%mensaje, "Resource not found");
                ErrorResponse::new(status, mensaje)
            }
            AppError::MethodNotAllowed => ErrorResponse::new(status, messages::METHOD_NOT_ALLOWED),
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                ErrorResponse::new(status, messages::INTERNAL_ERROR)
            }
            AppError::InternalServerError(details) => {
                tracing::error!(%details, "Internal server error");
                ErrorResponse::new(status, messages::INTERNAL_ERROR)
            }
            AppError::ServiceUnavailable(details) => {
                tracing::error!(%details, "Service unavailable");
                ErrorResponse::new(status, messages::SERVICE_UNAVAILABLE)
            }
        };

        body.into_response()
    }
}

/// Spanish message for an extractor rejection. serde names the offending
/// field between backticks (``duplicate field `nombre` ``); without one the
/// generic `fallback` is used.
fn rejected_parameter(details: &str, fallback: &str) -> String {
    let field = details
        .split_once('`')
        .and_then(|(_, rest)| rest.split_once('`'))
        .map(|(field, _)| field)
        .filter(|field| !field.is_empty());

    match field {
        Some(field) => messages::invalid_parameter(field),
        None => fallback.to_string(),
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        let details = rejection.body_text();
        tracing::debug!(%details, "Rejected path parameters");
        AppError::BadRequest(rejected_parameter(&details, messages::INVALID_PATH))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        let details = rejection.body_text();
        tracing::debug!(%details, "Rejected query string");
        AppError::BadRequest(rejected_parameter(&details, messages::INVALID_QUERY))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation_messages(&errors))
    }
}

/// Codes whose message wins when a field breaks several rules.
const PRIORITY_CODES: &[&str] = &["required", "not_blank"];

/// Flattens `validator` errors into one message per field, sorted by field name.
///
/// When a field has several violations, a `required`/`not_blank` violation is
/// reported instead of the others.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(&str, &Vec<ValidationError>)> = errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errors) => Some((field.as_ref(), errors)),
            _ => None,
        })
        .collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .filter_map(|(field, errors)| {
            let chosen = errors
                .iter()
                .find(|e| PRIORITY_CODES.contains(&e.code.as_ref()))
                .or_else(|| errors.first())?;

            Some(
                chosen
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field}: {}", chosen.code)),
            )
        })
        .collect()
}
