//! Liveness and readiness endpoints.
//!
//! - `/health` answers as long as the process serves requests
//! - `/health/ready` additionally pings the database
//! - `/health/version` reports the build version

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::AppState;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    fn status_code(self) -> StatusCode {
        match self {
            HealthStatus::Up => StatusCode::OK,
            HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/version", get(version_info))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200)))]
pub async fn health_check() -> impl IntoResponse {
    debug!("Health check endpoint called");

    (
        StatusCode::OK,
        Json(json!({
            "status": HealthStatus::Up,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses((status = 200, description = "Database reachable"), (status = 503))
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match crate::db::check_connection(&state.db).await {
        Ok(()) => HealthStatus::Up,
        Err(e) => {
            error!("Database readiness check failed: {}", e);
            HealthStatus::Down
        }
    };

    (
        database.status_code(),
        Json(json!({
            "ready": database == HealthStatus::Up,
            "database": database,
            "realtimeClients": state.realtime.connected_clients(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}

/// Returns build and version information
pub async fn version_info() -> impl IntoResponse {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "commit": option_env!("GIT_HASH").unwrap_or("unknown"),
    }))
}
