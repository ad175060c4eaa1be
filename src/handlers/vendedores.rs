use crate::{
    entities::vendedor,
    errors::{ApiError, ErrorResponse},
    handlers::common::{
        created_response, no_content_response, success_response, CatalogFilterParams, JsonBody,
        PaginatedResponse, PaginationParams, QueryParams,
    },
    services::vendedores::{
        CreateVendedorInput, VendedorFilter, UpdateVendedorInput,
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

pub fn vendedores_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vendedores).post(create_vendedor))
        .route("/codigo/:codigo", get(get_vendedor_by_codigo))
        .route(
            "/:id",
            get(get_vendedor).put(update_vendedor).delete(delete_vendedor),
        )
}

#[utoipa::path(
    get,
    path = "/api/vendedores",
    params(PaginationParams, CatalogFilterParams),
    responses(
        (status = 200, description = "Sellers ordered by codigo", body = PaginatedResponse<vendedor::Model>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "vendedores"
)]
pub async fn list_vendedores(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<CatalogFilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let request = pagination.page_request(&state.config);
    let page = state
        .services
        .vendedores
        .list(
            VendedorFilter {
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
    path = "/api/vendedores",
    request_body = CreateVendedorInput,
    responses(
        (status = 201, description = "Seller created", body = vendedor::Model),
        (status = 400, description = "Missing or blank field", body = ErrorResponse),
        (status = 409, description = "codigo already in use", body = ErrorResponse)
    ),
    tag = "vendedores"
)]
pub async fn create_vendedor(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateVendedorInput>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.services.vendedores.create(payload).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/vendedores/{id}",
    params(("id" = Uuid, Path, description = "Seller id")),
    responses(
        (status = 200, body = vendedor::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "vendedores"
)]
pub async fn get_vendedor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.vendedores.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/vendedores/codigo/{codigo}",
    params(("codigo" = String, Path, description = "Seller code")),
    responses(
        (status = 200, body = vendedor::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "vendedores"
)]
pub async fn get_vendedor_by_codigo(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.vendedores.get_by_codigo(&codigo).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/vendedores/{id}",
    params(("id" = Uuid, Path, description = "Seller id")),
    request_body = UpdateVendedorInput,
    responses(
        (status = 200, body = vendedor::Model),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ),
    tag = "vendedores"
)]
pub async fn update_vendedor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateVendedorInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.vendedores.update(id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/vendedores/{id}",
    params(("id" = Uuid, Path, description = "Seller id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, body = ErrorResponse)
    ),
    tag = "vendedores"
)]
pub async fn delete_vendedor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.vendedores.delete(id).await?;
    Ok(no_content_response())
}
