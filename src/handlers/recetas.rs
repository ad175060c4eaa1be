use crate::{
    entities::receta,
    errors::{ApiError, ErrorResponse},
    handlers::common::{
        created_response, no_content_response, success_response, JsonBody, PaginatedResponse,
        PaginationParams, QueryParams,
    },
    services::recetas::{CreateRecetaInput, RecetaFilter, UpdateRecetaInput},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecetaListQuery {
    /// Substring of the recipe name
    pub search: Option<String>,
    /// Only recipes producing this product
    pub producto_final: Option<Uuid>,
}

pub fn recetas_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recetas).post(create_receta))
        .route("/nombre/:nombre", get(get_receta_by_nombre))
        .route(
            "/:id",
            get(get_receta).put(update_receta).delete(delete_receta),
        )
}

#[utoipa::path(
    get,
    path = "/api/recetas",
    params(PaginationParams, RecetaListQuery),
    responses(
        (status = 200, description = "Recipes ordered by nombre", body = PaginatedResponse<receta::Model>)
    ),
    tag = "recetas"
)]
pub async fn list_recetas(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<RecetaListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = pagination.page_request(&state.config);
    let page = state
        .services
        .recetas
        .list(
            RecetaFilter {
                search: query.search,
                producto_final: query.producto_final,
            },
            request,
        )
        .await?;
    Ok(success_response(PaginatedResponse::from_page(page, request)))
}

#[utoipa::path(
    post,
    path = "/api/recetas",
    request_body = CreateRecetaInput,
    responses(
        (status = 201, body = receta::Model),
        (status = 400, description = "Blank name or invalid ingredient", body = ErrorResponse),
        (status = 409, description = "Recipe name already in use", body = ErrorResponse)
    ),
    tag = "recetas"
)]
pub async fn create_receta(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateRecetaInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(created_response(state.services.recetas.create(payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/recetas/{id}",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = receta::Model), (status = 404, body = ErrorResponse)),
    tag = "recetas"
)]
pub async fn get_receta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(state.services.recetas.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/recetas/nombre/{nombre}",
    params(("nombre" = String, Path)),
    responses((status = 200, body = receta::Model), (status = 404, body = ErrorResponse)),
    tag = "recetas"
)]
pub async fn get_receta_by_nombre(
    State(state): State<AppState>,
    Path(nombre): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.recetas.get_by_nombre(&nombre).await?,
    ))
}

/// Partial update. When `ingredientes` is present it replaces the whole list.
#[utoipa::path(
    put,
    path = "/api/recetas/{id}",
    params(("id" = Uuid, Path)),
    request_body = UpdateRecetaInput,
    responses(
        (status = 200, body = receta::Model),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ),
    tag = "recetas"
)]
pub async fn update_receta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(payload): JsonBody<UpdateRecetaInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(success_response(
        state.services.recetas.update(id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/recetas/{id}",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404, body = ErrorResponse)),
    tag = "recetas"
)]
pub async fn delete_receta(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.services.recetas.delete(id).await?;
    Ok(no_content_response())
}
