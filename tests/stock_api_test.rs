mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use pedidos_api::{
    entities::stock,
    errors::ServiceError,
    services::stock::{CreateStockInput, UpsertStockInput},
};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;
use uuid::Uuid;

use common::{decimal, TestApp};

#[tokio::test]
async fn stock_defaults_and_duplicate_pair_conflicts() {
    let app = TestApp::new().await;
    let producto = Uuid::new_v4();

    let created = app
        .create(
            "/api/stock",
            json!({ "producto": producto, "tiendaId": "T-01" }),
        )
        .await;
    assert_eq!(created["unidad"], "ud");
    assert_eq!(decimal(&created["cantidad"]), dec!(0));

    let (status, _) = app
        .post(
            "/api/stock",
            json!({ "producto": producto, "tiendaId": "T-01", "cantidad": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Same product in another store is a separate row
    app.create(
        "/api/stock",
        json!({ "producto": producto, "tiendaId": "T-02", "cantidad": 3, "unidad": "kg" }),
    )
    .await;

    let (_, por_producto) = app.get(&format!("/api/stock?producto={producto}")).await;
    assert_eq!(por_producto["pagination"]["total"], 2);
    let (_, por_tienda) = app.get("/api/stock?tiendaId=T-02").await;
    assert_eq!(por_tienda["pagination"]["total"], 1);
    assert_eq!(por_tienda["data"][0]["unidad"], "kg");
}

#[tokio::test]
async fn upsert_creates_then_updates_the_same_row() {
    let app = TestApp::new().await;
    let producto = Uuid::new_v4();
    let uri = format!("/api/stock/tienda/T-07/producto/{producto}");

    let (status, first) = app.put(&uri, json!({ "cantidad": "12.5", "unidad": "kg" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&first["cantidad"]), dec!(12.5));

    let (status, second) = app.put(&uri, json!({ "cantidad": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(decimal(&second["cantidad"]), dec!(4));
    assert_eq!(second["unidad"], "kg");

    let (_, list) = app.get("/api/stock?tiendaId=T-07").await;
    assert_eq!(list["pagination"]["total"], 1);
}

#[tokio::test]
async fn update_changes_quantity_only() {
    let app = TestApp::new().await;
    let created = app
        .create(
            "/api/stock",
            json!({ "producto": Uuid::new_v4(), "tiendaId": "T-03", "cantidad": 10 }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = app
        .put(&format!("/api/stock/{id}"), json!({ "cantidad": -2 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&updated["cantidad"]), dec!(-2));
    assert_eq!(updated["tiendaId"], "T-03");
    assert_eq!(updated["producto"], created["producto"]);

    let (status, _) = app
        .put(&format!("/api/stock/{id}"), json!({ "unidad": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stock_requires_store_and_valid_product() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/stock",
            json!({ "producto": Uuid::new_v4(), "tiendaId": "  " }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/stock", json!({ "producto": "abc", "tiendaId": "T-01" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_stock_frees_the_pair() {
    let app = TestApp::new().await;
    let producto = Uuid::new_v4();
    let created = app
        .create(
            "/api/stock",
            json!({ "producto": producto, "tiendaId": "T-09" }),
        )
        .await;

    assert_eq!(
        app.delete(&format!("/api/stock/{}", created["id"].as_str().unwrap()))
            .await,
        StatusCode::NO_CONTENT
    );
    app.create(
        "/api/stock",
        json!({ "producto": producto, "tiendaId": "T-09" }),
    )
    .await;
}

#[tokio::test]
async fn unique_index_rejects_duplicates_that_skip_the_service() {
    let app = TestApp::new().await;
    let producto = Uuid::new_v4();
    let service = app.state.services.stock.clone();

    service
        .create(CreateStockInput {
            producto,
            tienda_id: "T-11".into(),
            cantidad: Some(dec!(1)),
            unidad: None,
        })
        .await
        .expect("first row");

    let err = stock::ActiveModel {
        producto: Set(producto),
        tienda_id: Set("T-11".into()),
        ..Default::default()
    }
    .insert(app.state.db.as_ref())
    .await
    .expect_err("index must reject the duplicate pair");
    assert_matches!(
        ServiceError::from_db_write(err, "stock"),
        ServiceError::Conflict(_)
    );

    let outcome = service
        .upsert(
            "T-11",
            producto,
            UpsertStockInput {
                cantidad: dec!(9),
                unidad: None,
            },
        )
        .await
        .expect("upsert existing pair");
    assert!(!outcome.created);
    assert_eq!(outcome.stock.cantidad, dec!(9));
}

#[tokio::test]
async fn blank_store_in_upsert_path_is_rejected() {
    let app = TestApp::new().await;
    let result = app
        .state
        .services
        .stock
        .upsert(
            "  ",
            Uuid::new_v4(),
            UpsertStockInput {
                cantidad: dec!(1),
                unidad: None,
            },
        )
        .await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn negative_stock_is_warned_about_once() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = TestApp::new().await;
    let mut rx = app.state.realtime.subscribe();
    let (status, _) = app
        .put(
            &format!("/api/stock/tienda/T-13/producto/{}", Uuid::new_v4()),
            json!({ "cantidad": -2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    tokio::time::timeout(std::time::Duration::from_secs(2), rx.recv())
        .await
        .expect("event within timeout")
        .expect("hub open");

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let warnings = output
        .lines()
        .filter(|line| line.contains("WARN") && line.contains("T-13"))
        .count();
    assert_eq!(warnings, 1, "log output:\n{output}");
}
