use crate::{
    entities::forma_pago,
    errors::{ApiError, ErrorResponse},
    handlers::common::{
        created_response, no_content_response, success_response, CatalogFilterParams, JsonBody,
        PaginatedResponse, PaginationParams, QueryParams,
    },
    services::formas_pago::{
        CreateFormaPagoInput, FormaPagoFilter, UpdateFormaPagoInput,
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

pub fn formas_pago_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_formas_pago).post(create_forma_pago))
        .route("/codigo/:codigo", get(get_forma_pago_by_codigo))
        .route(
            "/:id",
            get(get_forma_pago).put(update_forma_pago).delete(delete_forma_pago),
        )
}

#[utoipa::path(
    get,
    path = "/api/formas-pago",
    params(PaginationParams, CatalogFilterParams),
    responses(
        (status = 200, description = "Payment methods ordered by codigo", body = PaginatedResponse<forma_pago::Model>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "formas-pago"
)]
pub async fn list_formas_pago(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<CatalogFilterParams>,
) -> Result<impl IntoResponse, ApiError> {
    let request = pagination.page_request(&state.config);
    let page = state
        .services
        .formas_pago
        .list(
            FormaPagoFilter {
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
    path = "/api/formas-pago",
    request_body = CreateFormaPagoInput,
    responses(
        (status = 201, description = "Payment method created", body = forma_pago::Model),
        (status = 400, description = "Missing or blank field", body = ErrorResponse),
        (status = 409, description = "codigo already in use", body = ErrorResponse)
    ),
    tag = "formas-pago"
)]
pub async fn create_forma_pago(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateFormaPagoInput>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.services.formas_pago.create(payload).await?;
    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/formas-pago/{id}",
    params(("id" = Uuid, Path, description = "Payment method id")),
    responses(
        (status = 200, body = forma_pago::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "formas-pago"
)]
pub async fn get_forma_pago(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.formas_pago.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/formas-pago/codigo/{codigo}",
    params(("codigo" = String, Path, description = "Payment method code")),
    responses(
        (status = 200, body = forma_pago::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "formas-pago"
)]
pub async fn get_forma_pago_by_codigo(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.formas_pago.get_by_codigo(&codigo).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/formas-pago/{id}",
    params(("id" = Uuid, Path, description = "Payment method id")),
    request_body = UpdateFormaPagoInput,
    responses(
        (status = 200, body = forma_pago::Model),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ),
    tag = "formas-pago"
)]
pub async fn update_forma_pago(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateFormaPagoInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.formas_pago.update(id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/formas-pago/{id}",
    params(("id" = Uuid, Path, description = "Payment method id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, body = ErrorResponse)
    ),
    tag = "formas-pago"
)]
pub async fn delete_forma_pago(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.formas_pago.delete(id).await?;
    Ok(no_content_response())
}
