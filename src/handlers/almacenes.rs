use crate::{
    entities::almacen,
    errors::{ApiError, ErrorResponse},
    handlers::common::{
        created_response, no_content_response, success_response, CatalogFilterParams, JsonBody,
        PaginatedResponse, PaginationParams, QueryParams,
    },
    services::almacenes::{AlmacenFilter, CreateAlmacenInput, UpdateAlmacenInput},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;

pub fn almacenes_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_almacenes).post(create_almacen))
        .route("/codigo/:codigo", get(get_almacen_by_codigo))
        .route(
            "/:id",
            get(get_almacen).put(update_almacen).delete(delete_almacen),
        )
}

#[utoipa::path(
    get,
    path = "/api/almacenes",
    params(PaginationParams, CatalogFilterParams),
    responses(
        (status = 200, description = "Warehouses ordered by codigo", body = PaginatedResponse<almacen::Model>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "almacenes"
)]
pub async fn list_almacenes(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<CatalogFilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let request = pagination.page_request(&state.config);
    let page = state
        .services
        .almacenes
        .list(
            AlmacenFilter {
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
    path = "/api/almacenes",
    request_body = CreateAlmacenInput,
    responses(
        (status = 201, description = "Warehouse created", body = almacen::Model),
        (status = 400, description = "Missing or blank field", body = ErrorResponse),
        (status = 409, description = "codigo already in use", body = ErrorResponse)
    ),
    tag = "almacenes"
)]
pub async fn create_almacen(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateAlmacenInput>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.services.almacenes.create(payload).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/almacenes/{id}",
    params(("id" = Uuid, Path, description = "Warehouse id")),
    responses(
        (status = 200, body = almacen::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "almacenes"
)]
pub async fn get_almacen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.almacenes.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/almacenes/codigo/{codigo}",
    params(("codigo" = String, Path, description = "Warehouse code")),
    responses(
        (status = 200, body = almacen::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "almacenes"
)]
pub async fn get_almacen_by_codigo(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.almacenes.get_by_codigo(&codigo).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/almacenes/{id}",
    params(("id" = Uuid, Path, description = "Warehouse id")),
    request_body = UpdateAlmacenInput,
    responses(
        (status = 200, body = almacen::Model),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ),
    tag = "almacenes"
)]
pub async fn update_almacen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateAlmacenInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.almacenes.update(id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/almacenes/{id}",
    params(("id" = Uuid, Path, description = "Warehouse id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, body = ErrorResponse)
    ),
    tag = "almacenes"
)]
pub async fn delete_almacen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.almacenes.delete(id).await?;
    Ok(no_content_response())
}
