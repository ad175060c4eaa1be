use crate::{
    entities::historial_proveedor_individual,
    errors::{ApiError, ErrorResponse},
    handlers::common::{
        created_response, no_content_response, success_response, JsonBody, PaginatedResponse,
        PaginationParams, QueryParams,
    },
    services::historial_proveedor::{CreateHistorialInput, HistorialFilter},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HistorialListQuery {
    /// Store whose history is listed (required)
    pub tienda_id: Option<String>,
    pub proveedor: Option<String>,
    /// Inclusive lower bound on fechaPedido (RFC 3339)
    pub desde: Option<DateTime<Utc>>,
    /// Inclusive upper bound on fechaPedido (RFC 3339)
    pub hasta: Option<DateTime<Utc>>,
}

pub fn historial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_historial).post(create_historial))
        .route("/:id", get(get_historial).delete(delete_historial))
}

#[utoipa::path(
    get,
    path = "/api/historial-proveedor",
    params(PaginationParams, HistorialListQuery),
    responses(
        (status = 200, description = "Entries for the store, newest first", body = PaginatedResponse<historial_proveedor_individual::Model>),
        (status = 400, description = "tiendaId missing or bad date range", body = ErrorResponse)
    ),
    tag = "historial-proveedor"
)]
pub async fn list_historial(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<HistorialListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tienda_id = query
        .tienda_id
        .ok_or_else(|| ApiError::BadRequest("tiendaId query parameter is required".into()))?;
    let request = pagination.page_request(&state.config);
    let page = state
        .services
        .historial
        .list_for_tienda(
            HistorialFilter {
                tienda_id,
                proveedor: query.proveedor,
                desde: query.desde,
                hasta: query.hasta,
            },
            request,
        )
        .await?;
    Ok(success_response(PaginatedResponse::from_page(page, request)))
}

#[utoipa::path(
    post,
    path = "/api/historial-proveedor",
    request_body = CreateHistorialInput,
    responses(
        (status = 201, body = historial_proveedor_individual::Model),
        (status = 400, body = ErrorResponse)
    ),
    tag = "historial-proveedor"
)]
pub async fn create_historial(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateHistorialInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(
        state.services.historial.create(payload).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/historial-proveedor/{id}",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, body = historial_proveedor_individual::Model),
        (status = 404, body = ErrorResponse)
    ),
    tag = "historial-proveedor"
)]
pub async fn get_historial(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.historial.get(id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/historial-proveedor/{id}",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404, body = ErrorResponse)),
    tag = "historial-proveedor"
)]
pub async fn delete_historial(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.historial.delete(id).await?;
    Ok(no_content_response())
}
