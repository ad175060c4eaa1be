#![allow(dead_code)]

use std::{str::FromStr, sync::Arc};

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use pedidos_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    realtime::RealtimeHub,
    AppState,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Helper harness backed by a private in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Builds the app after letting the caller tweak the configuration.
    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            10_001,
            "test".to_string(),
        );
        cfg.cors_allow_any_origin = true;
        // A second connection would open a different in-memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        tweak(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let (event_tx, event_rx) = mpsc::channel(cfg.event_channel_capacity);
        let realtime = RealtimeHub::new(cfg.realtime_channel_capacity);
        let event_task = tokio::spawn(events::process_events(event_rx, realtime.clone()));

        let state = AppState::new(Arc::new(pool), cfg, EventSender::new(event_tx), realtime);
        let router = pedidos_api::build_router(state.clone()).expect("router builds");

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Router clone, for serving over a real listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize request body"))
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("router error during test request")
    }

    /// Sends a raw body, for payloads that are not valid JSON.
    pub async fn request_raw(&self, method: Method, uri: &str, raw: &'static str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        split(self.request(Method::GET, uri, None).await).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        split(self.request(Method::POST, uri, Some(body)).await).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        split(self.request(Method::PUT, uri, Some(body)).await).await
    }

    pub async fn delete(&self, uri: &str) -> StatusCode {
        self.request(Method::DELETE, uri, None).await.status()
    }

    /// Creates a record and returns its body, failing the test on a non-201.
    pub async fn create(&self, uri: &str, body: Value) -> Value {
        let (status, created) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
        created
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("json response")
}

async fn split(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    (status, response_json(response).await)
}

/// Reads a decimal field whether it was serialized as a string or a number.
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("expected a decimal, got {other}"),
    }
}
