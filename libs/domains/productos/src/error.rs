use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, errors::messages, validation_messages};
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductoError {
    #[error("{resource} not found with {field}: '{value}'")]
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    /// One message per invalid field
    #[error("Invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A query or path argument that cannot be used as given
    #[error("Bad argument: {0}")]
    BadArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductoResult<T> = Result<T, ProductoError>;

impl ProductoError {
    pub fn not_found(id: i64) -> Self {
        ProductoError::NotFound {
            resource: "Producto",
            field: "id",
            value: id.to_string(),
        }
    }
}

impl From<DbErr> for ProductoError {
    fn from(err: DbErr) -> Self {
        ProductoError::Internal(format!("Database error: {}", err))
    }
}

impl From<ValidationErrors> for ProductoError {
    fn from(errors: ValidationErrors) -> Self {
        ProductoError::Validation(validation_messages(&errors))
    }
}

/// Convert ProductoError to AppError for standardized error responses
impl From<ProductoError> for AppError {
    fn from(err: ProductoError) -> Self {
        match err {
            ProductoError::NotFound {
                resource,
                field,
                value,
            } => AppError::NotFound(messages::not_found(resource, field, value)),
            ProductoError::Validation(errores) => AppError::Validation(errores),
            ProductoError::BadArgument(msg) => AppError::BadRequest(msg),
            ProductoError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductoError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404_with_id_in_message() {
        let app_error: AppError = ProductoError::not_found(999).into();
        assert_eq!(app_error.status_code(), StatusCode::NOT_FOUND);

        match app_error {
            AppError::NotFound(msg) => assert_eq!(msg, "Producto no encontrado con id: '999'"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ProductoError::Validation(vec!["x".into()]), StatusCode::BAD_REQUEST),
            (ProductoError::BadArgument("x".into()), StatusCode::BAD_REQUEST),
            (ProductoError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_db_error_becomes_internal() {
        let err = ProductoError::from(DbErr::Custom("pool timed out".into()));
        assert!(matches!(err, ProductoError::Internal(msg) if msg.contains("pool timed out")));
    }
}
