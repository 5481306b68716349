//! HTTP handlers for the Productos API

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::{
        AppError, ErrorResponse, messages,
        responses::{
            BadRequestParameterResponse, BadRequestValidationResponse,
            InternalServerErrorResponse, NotFoundResponse,
        },
    },
    server::method_not_allowed,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::{ProductoError, ProductoResult};
use crate::models::{ProductoRequest, ProductoResponse};
use crate::repository::ProductoRepository;
use crate::service::ProductoService;

pub const TAG: &str = "Productos";

/// OpenAPI documentation for the Productos API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_productos,
        create_producto,
        get_producto,
        update_producto,
        delete_producto,
        buscar_por_nombre,
        buscar_por_rango_precio,
    ),
    components(
        schemas(ProductoRequest, ProductoResponse, ErrorResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestParameterResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Gestión de productos")
    )
)]
pub struct ApiDoc;

/// Create the productos router with all HTTP endpoints
pub fn router<R: ProductoRepository + 'static>(service: ProductoService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_productos).post(create_producto))
        .route("/buscar", get(buscar_por_nombre))
        .route("/rango-precio", get(buscar_por_rango_precio))
        .route(
            "/{id}",
            get(get_producto).put(update_producto).delete(delete_producto),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
}

/// List every producto
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All productos", body = Vec<ProductoResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_productos<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
) -> ProductoResult<Json<Vec<ProductoResponse>>> {
    let productos = service.list_all().await?;
    Ok(Json(productos.into_iter().map(Into::into).collect()))
}

/// Create a producto
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductoRequest,
    responses(
        (status = 201, description = "Producto created", body = ProductoResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_producto<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    ValidatedJson(request): ValidatedJson<ProductoRequest>,
) -> ProductoResult<impl IntoResponse> {
    let producto = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(ProductoResponse::from(producto))))
}

/// Get a producto by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Producto id")
    ),
    responses(
        (status = 200, description = "Producto found", body = ProductoResponse),
        (status = 400, response = BadRequestParameterResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_producto<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    IdPath(id): IdPath,
) -> ProductoResult<Json<ProductoResponse>> {
    let producto = service.get_by_id(id).await?;
    Ok(Json(producto.into()))
}

/// Replace nombre, descripcion and precio of a producto
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Producto id")
    ),
    request_body = ProductoRequest,
    responses(
        (status = 200, description = "Producto updated", body = ProductoResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_producto<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<ProductoRequest>,
) -> ProductoResult<Json<ProductoResponse>> {
    let producto = service.update(id, request).await?;
    Ok(Json(producto.into()))
}

/// Delete a producto
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Producto id")
    ),
    responses(
        (status = 204, description = "Producto deleted"),
        (status = 400, response = BadRequestParameterResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_producto<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    IdPath(id): IdPath,
) -> ProductoResult<impl IntoResponse> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Name search query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BuscarQuery {
    /// Case-insensitive substring of the nombre (required); empty matches every producto
    pub nombre: Option<String>,
}

/// Search productos whose nombre contains a substring
#[utoipa::path(
    get,
    path = "/buscar",
    tag = TAG,
    params(BuscarQuery),
    responses(
        (status = 200, description = "Matching productos", body = Vec<ProductoResponse>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn buscar_por_nombre<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    query: Result<Query<BuscarQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<Vec<ProductoResponse>>, AppError> {
    let Query(query) = query?;
    let nombre = query
        .nombre
        .ok_or_else(|| ProductoError::BadArgument(messages::missing_parameter("nombre")))?;

    let productos = service.search_by_name(&nombre).await?;
    Ok(Json(productos.into_iter().map(Into::into).collect()))
}

/// Price range query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangoPrecioQuery {
    /// Inclusive lower bound (required)
    #[param(value_type = String, example = "10.00")]
    pub min: Option<String>,
    /// Inclusive upper bound (required)
    #[param(value_type = String, example = "100.00")]
    pub max: Option<String>,
}

fn parse_precio(name: &str, raw: Option<&str>) -> ProductoResult<Decimal> {
    let raw = raw.ok_or_else(|| ProductoError::BadArgument(messages::missing_parameter(name)))?;
    Decimal::from_str(raw.trim())
        .map_err(|_| ProductoError::BadArgument(messages::type_mismatch(name, "decimal")))
}

/// Productos priced within `[min, max]`, cheapest first
#[utoipa::path(
    get,
    path = "/rango-precio",
    tag = TAG,
    params(RangoPrecioQuery),
    responses(
        (status = 200, description = "Productos in range", body = Vec<ProductoResponse>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn buscar_por_rango_precio<R: ProductoRepository>(
    State(service): State<Arc<ProductoService<R>>>,
    query: Result<Query<RangoPrecioQuery>, axum::extract::rejection::QueryRejection>,
) -> Result<Json<Vec<ProductoResponse>>, AppError> {
    let Query(query) = query?;
    let min = parse_precio("min", query.min.as_deref())?;
    let max = parse_precio("max", query.max.as_deref())?;

    let productos = service.search_by_price_range(min, max).await?;
    Ok(Json(productos.into_iter().map(Into::into).collect()))
}
