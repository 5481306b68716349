//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "mensaje": "Error interno del servidor. Por favor, contacte al administrador.",
        "timestamp": "2024-01-15 10:30:00",
        "path": "/api/v1/productos"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "mensaje": "Error de validación en los datos de entrada",
        "timestamp": "2024-01-15 10:30:00",
        "path": "/api/v1/productos",
        "errores": [
            "La descripción debe tener entre 10 y 500 caracteres",
            "El nombre del producto es obligatorio",
            "El precio debe ser mayor a 0"
        ]
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid parameter",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "mensaje": "El parámetro 'id' debe ser de tipo entero",
        "timestamp": "2024-01-15 10:30:00",
        "path": "/api/v1/productos/abc"
    })
)]
pub struct BadRequestParameterResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "mensaje": "Producto no encontrado con id: '999'",
        "timestamp": "2024-01-15 10:30:00",
        "path": "/api/v1/productos/999"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "status": 503,
        "mensaje": "Servicio no disponible temporalmente",
        "timestamp": "2024-01-15 10:30:00",
        "path": "/ready"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
