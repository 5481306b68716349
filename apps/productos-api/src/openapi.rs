//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Productos API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Productos API",
        version = "0.1.0",
        description = "API REST para la gestión de productos"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/productos", api = domain_productos::ApiDoc)
    )
)]
pub struct ApiDoc;
