use crate::{
    entities::producto_sage,
    errors::{ApiError, ErrorResponse},
    handlers::common::{
        created_response, no_content_response, success_response, CatalogFilterParams, JsonBody,
        PaginatedResponse, PaginationParams, QueryParams,
    },
    services::productos_sage::{
        CreateProductoSageInput, ProductoSageFilter, UpdateProductoSageInput,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;

pub fn productos_sage_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_productos_sage).post(create_producto_sage))
        .route("/codigo/:codigo", get(get_producto_sage_by_codigo))
        .route(
            "/:id",
            get(get_producto_sage).put(update_producto_sage).delete(delete_producto_sage),
        )
}

#[utoipa::path(
    get,
    path = "/api/productos-sage",
    params(PaginationParams, CatalogFilterParams),
    responses(
        (status = 200, description = "Products ordered by codigo", body = PaginatedResponse<producto_sage::Model>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "productos-sage"
)]
pub async fn list_productos_sage(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<CatalogFilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let request = pagination.page_request(&state.config);
    let page = state
        .services
        .productos_sage
        .list(
            ProductoSageFilter {
                search: filter.search,
                activo: filter.activo,
            },
            request,
        )
        .await?;
    Ok(success_response(PaginatedResponse::from_page(page, request)))
}

#[utoipa::path(
    post,
    path = "/api/productos-sage",
    request_body = CreateProductoSageInput,
    responses(
        (status = 201, description = "Product created", body = producto_sage::Model),
        (status = 400, description = "Missing or blank field", body = ErrorResponse),
        (status = 409, description = "codigo already in use", body = ErrorResponse)
    ),
    tag = "productos-sage"
)]
pub async fn create_producto_sage(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateProductoSageInput>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.services.productos_sage.create(payload).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/productos-sage/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, body = producto_sage::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "productos-sage"
)]
pub async fn get_producto_sage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.productos_sage.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/productos-sage/codigo/{codigo}",
    params(("codigo" = String, Path, description = "Product code")),
    responses(
        (status = 200, body = producto_sage::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "productos-sage"
)]
pub async fn get_producto_sage_by_codigo(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.productos_sage.get_by_codigo(&codigo).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/productos-sage/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductoSageInput,
    responses(
        (status = 200, body = producto_sage::Model),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ),
    tag = "productos-sage"
)]
pub async fn update_producto_sage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateProductoSageInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.productos_sage.update(id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/productos-sage/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, body = ErrorResponse)
    ),
    tag = "productos-sage"
)]
pub async fn delete_producto_sage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.productos_sage.delete(id).await?;
    Ok(no_content_response())
}
