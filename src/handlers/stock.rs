use crate::{
    entities::stock,
    errors::{ApiError, ErrorResponse},
    handlers::common::{
        created_response, no_content_response, success_response, JsonBody, PaginatedResponse,
        PaginationParams, QueryParams,
    },
    services::stock::{CreateStockInput, StockFilter, UpdateStockInput, UpsertStockInput},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StockListQuery {
    pub tienda_id: Option<String>,
    pub producto: Option<Uuid>,
}

pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stock).post(create_stock))
        .route(
            "/tienda/:tienda_id/producto/:producto_id",
            put(upsert_stock),
        )
        .route(
            "/:id",
            get(get_stock).put(update_stock).delete(delete_stock),
        )
}

#[utoipa::path(
    get,
    path = "/api/stock",
    params(PaginationParams, StockListQuery),
    responses((status = 200, body = PaginatedResponse<stock::Model>)),
    tag = "stock"
)]
pub async fn list_stock(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<StockListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = pagination.page_request(&state.config);
    let page = state
        .services
        .stock
        .list(
            StockFilter {
                tienda_id: query.tienda_id,
                producto: query.producto,
            },
            request,
        )
        .await?;
    Ok(success_response(PaginatedResponse::from_page(page, request)))
}

#[utoipa::path(
    post,
    path = "/api/stock",
    request_body = CreateStockInput,
    responses(
        (status = 201, body = stock::Model),
        (status = 400, body = ErrorResponse),
        (status = 409, description = "Row for this product and store already exists", body = ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn create_stock(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateStockInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(state.services.stock.create(payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/stock/{id}",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = stock::Model), (status = 404, body = ErrorResponse)),
    tag = "stock"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.stock.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/stock/{id}",
    params(("id" = Uuid, Path)),
    request_body = UpdateStockInput,
    responses(
        (status = 200, body = stock::Model),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateStockInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.stock.update(id, payload).await?,
    ))
}

/// Sets the quantity of a product at a store. Responds 201 when the row was
/// created and 200 when an existing row was updated.
#[utoipa::path(
    put,
    path = "/api/stock/tienda/{tienda_id}/producto/{producto_id}",
    params(
        ("tienda_id" = String, Path, description = "Store identifier"),
        ("producto_id" = Uuid, Path, description = "Product id")
    ),
    request_body = UpsertStockInput,
    responses(
        (status = 200, description = "Existing row updated", body = stock::Model),
        (status = 201, description = "Row created", body = stock::Model),
        (status = 400, body = ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn upsert_stock(
    State(state): State<AppState>,
    Path((tienda_id, producto_id)): Path<(String, Uuid)>,
    JsonBody(payload): JsonBody<UpsertStockInput>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .services
        .stock
        .upsert(&tienda_id, producto_id, payload)
        .await?;
    if outcome.created {
        Ok(created_response(outcome.stock))
    } else {
        Ok(success_response(outcome.stock))
    }
}

#[utoipa::path(
    delete,
    path = "/api/stock/{id}",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404, body = ErrorResponse)),
    tag = "stock"
)]
pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.stock.delete(id).await?;
    Ok(no_content_response())
}
