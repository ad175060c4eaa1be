//! Pedidos API library
//!
//! Order-management backend for a butcher-shop chain: catalog collections,
//! recipes, per-store stock, supplier order history and a realtime socket.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod realtime;
pub mod services;
pub mod tracing;

use std::{path::Path, sync::Arc};

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use http::HeaderValue;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, Any, CorsLayer},
    services::{ServeDir, ServeFile},
};
use utoipa::ToSchema;

use crate::config::AppConfig;
use crate::events::EventSender;
use crate::realtime::RealtimeHub;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub event_sender: Arc<EventSender>,
    pub realtime: RealtimeHub,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: AppConfig,
        event_sender: EventSender,
        realtime: RealtimeHub,
    ) -> Self {
        let event_sender = Arc::new(event_sender);
        let services = handlers::AppServices::new(db.clone(), event_sender.clone());
        Self {
            db,
            config: Arc::new(config),
            event_sender,
            realtime,
            services,
        }
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Routes mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(api_status))
        .route("/realtime/status", get(realtime::realtime_status))
        .nest("/almacenes", handlers::almacenes::almacenes_routes())
        .nest("/formas-pago", handlers::formas_pago::formas_pago_routes())
        .nest(
            "/productos-sage",
            handlers::productos_sage::productos_sage_routes(),
        )
        .nest("/vendedores", handlers::vendedores::vendedores_routes())
        .nest("/recetas", handlers::recetas::recetas_routes())
        .nest("/stock", handlers::stock::stock_routes())
        .nest(
            "/historial-proveedor",
            handlers::historial_proveedor::historial_routes(),
        )
}

async fn api_status(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({
        "status": "ok",
        "service": "pedidos-api",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "realtimeClients": state.realtime.connected_clients(),
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

/// Builds the CORS policy from configuration.
///
/// Explicit origins win; otherwise permissive CORS is used only where the
/// configuration allows it.
pub fn cors_layer(cfg: &AppConfig) -> Result<CorsLayer, errors::ServiceError> {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        let layer = CorsLayer::new().allow_origin(origins);
        // Wildcards are rejected by browsers on credentialed requests
        return Ok(if cfg.cors_allow_credentials {
            layer
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        } else {
            layer.allow_methods(Any).allow_headers(Any)
        });
    }

    if cfg.should_allow_permissive_cors() {
        ::tracing::info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        return Ok(CorsLayer::permissive());
    }

    Err(errors::ServiceError::InvalidInput(
        "Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true"
            .to_string(),
    ))
}

/// Serves a built front end with client-side routing: unknown paths get `index.html`.
fn spa_service(dir: &str) -> ServeDir<ServeFile> {
    let root = Path::new(dir);
    ServeDir::new(root).fallback(ServeFile::new(root.join("index.html")))
}

/// Assembles the full application: API, socket, docs, static apps and middleware.
pub fn build_router(state: AppState) -> Result<Router, errors::ServiceError> {
    let cfg = state.config.clone();

    let mut app = Router::<AppState>::new()
        .nest("/health", health::health_routes())
        .nest("/api", api_routes())
        .route("/socket", get(realtime::socket_handler))
        .merge(openapi::swagger_ui());

    if let Some(dir) = cfg.clientes_gestion_dir.as_deref() {
        app = app.nest_service("/clientes-gestion", spa_service(dir));
    }
    app = match cfg.static_dir.as_deref() {
        Some(dir) => app.fallback_service(spa_service(dir)),
        None => app.route("/", get(|| async { "pedidos-api up" })),
    };

    Ok(app
        .layer(crate::tracing::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(cors_layer(&cfg)?)
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[test]
    fn cors_requires_configuration_outside_development() {
        let cfg = AppConfig::new(
            "sqlite::memory:".into(),
            "0.0.0.0".into(),
            10001,
            "production".into(),
        );
        assert!(cors_layer(&cfg).is_err());

        let mut allowed = cfg.clone();
        allowed.cors_allowed_origins = Some("https://pedidos.example.com".into());
        allowed.cors_allow_credentials = true;
        assert!(cors_layer(&allowed).is_ok());
    }
}
