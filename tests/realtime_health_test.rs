mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use futures::{SinkExt, Stream, StreamExt};
use pedidos_api::realtime::RealtimeMessage;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::broadcast, time::timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use uuid::Uuid;

use common::TestApp;

async fn next_event(rx: &mut broadcast::Receiver<RealtimeMessage>) -> RealtimeMessage {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("event within timeout")
        .expect("hub still open")
}

#[tokio::test]
async fn writes_are_broadcast_to_socket_subscribers() {
    let app = TestApp::new().await;
    let mut rx = app.state.realtime.subscribe();

    let created = app
        .create(
            "/api/almacenes",
            json!({ "codigo": "ALM-RT", "nombre": "Tiempo real" }),
        )
        .await;
    let event = next_event(&mut rx).await;
    assert_eq!(event.event, "almacenes:created");
    assert_eq!(event.payload["id"], created["id"]);

    let producto = Uuid::new_v4();
    app.put(
        &format!("/api/stock/tienda/T-01/producto/{producto}"),
        json!({ "cantidad": 0 }),
    )
    .await;
    let event = next_event(&mut rx).await;
    assert_eq!(event.event, "stock:created");
    assert_eq!(event.payload["tiendaId"], "T-01");
    assert_eq!(event.payload["producto"], producto.to_string());

    let id = created["id"].as_str().unwrap();
    app.delete(&format!("/api/almacenes/{id}")).await;
    assert_eq!(next_event(&mut rx).await.event, "almacenes:deleted");
}

#[tokio::test]
async fn rejected_writes_publish_nothing() {
    let app = TestApp::new().await;
    let mut rx = app.state.realtime.subscribe();

    let (status, _) = app.post("/api/almacenes", json!({ "nombre": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(timeout(Duration::from_millis(200), rx.recv()).await.is_err());
}

#[tokio::test]
async fn realtime_status_reports_connected_clients() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/realtime/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connectedClients"], 0);
}

#[tokio::test]
async fn socket_route_requires_an_upgrade() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/socket", None).await;
    assert!(response.status().is_client_error());
}

async fn next_text<S>(socket: &mut S) -> String
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let frame = timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("frame within timeout")
            .expect("socket open")
            .expect("valid frame");
        if frame.is_text() {
            return frame.to_text().expect("utf-8 text").to_string();
        }
    }
}

#[tokio::test]
async fn socket_session_greets_answers_ping_and_streams_events() {
    let app = TestApp::new().await;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router();
    let server = tokio::spawn(async move { axum::serve(listener, router).await });

    let (mut socket, _) = connect_async(format!("ws://{addr}/socket"))
        .await
        .expect("websocket handshake");

    let greeting: Value = serde_json::from_str(&next_text(&mut socket).await).unwrap();
    assert_eq!(greeting["event"], "connected");
    assert!(greeting["payload"]["clientId"].as_str().is_some());
    assert!(greeting["timestamp"].is_string());

    let (_, status) = app.get("/api/realtime/status").await;
    assert_eq!(status["connectedClients"], 1);

    socket.send(Message::Text("ping".into())).await.unwrap();
    assert_eq!(next_text(&mut socket).await, "pong");

    let created = app
        .create(
            "/api/almacenes",
            json!({ "codigo": "ALM-WS", "nombre": "Socket" }),
        )
        .await;
    let frame: Value = serde_json::from_str(&next_text(&mut socket).await).unwrap();
    assert_eq!(frame["event"], "almacenes:created");
    assert_eq!(frame["payload"]["id"], created["id"]);

    socket.close(None).await.unwrap();
    timeout(Duration::from_secs(2), async {
        while app.state.realtime.connected_clients() != 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("client count returns to zero after close");

    server.abort();
}

#[tokio::test]
async fn health_endpoints_report_up() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");

    let (status, body) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["database"], "up");

    let (status, body) = app.get("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["service"], "pedidos-api");
}

#[tokio::test]
async fn responses_echo_request_id_and_openapi_is_served() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = common::response_json(response).await;
    assert!(doc["paths"]["/api/stock/tienda/{tienda_id}/producto/{producto_id}"].is_object());

    let response = app.request(Method::GET, "/health", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn static_front_end_falls_back_to_index() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>panel</html>").unwrap();
    let path = dir.path().to_string_lossy().to_string();
    let app = TestApp::with_config(|cfg| cfg.static_dir = Some(path)).await;

    let response = app.request(Method::GET, "/pedidos/42", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<html>panel</html>");

    let (status, _) = app.get("/api/realtime/status").await;
    assert_eq!(status, StatusCode::OK);
}
