mod common;

use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;

use common::{decimal, TestApp};

#[tokio::test]
async fn almacen_lifecycle() {
    let app = TestApp::new().await;

    let created = app
        .create(
            "/api/almacenes",
            json!({ "codigo": "ALM-01", "nombre": "Almacén norte", "telefono": "  " }),
        )
        .await;
    assert_eq!(created["codigo"], "ALM-01");
    assert_eq!(created["activo"], true);
    assert!(created["telefono"].is_null());
    let id = created["id"].as_str().expect("id").to_string();

    let (status, fetched) = app.get(&format!("/api/almacenes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["nombre"], "Almacén norte");

    let (status, by_codigo) = app.get("/api/almacenes/codigo/ALM-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_codigo["id"], id.as_str());

    let (status, updated) = app
        .put(
            &format!("/api/almacenes/{id}"),
            json!({ "nombre": "Almacén norte 2", "activo": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nombre"], "Almacén norte 2");
    assert_eq!(updated["activo"], false);
    assert_eq!(updated["codigo"], "ALM-01");

    assert_eq!(
        app.delete(&format!("/api/almacenes/{id}")).await,
        StatusCode::NO_CONTENT
    );
    let (status, _) = app.get(&format!("/api/almacenes/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.delete(&format!("/api/almacenes/{id}")).await,
        StatusCode::NOT_FOUND
    );
}

#[rstest]
#[case::missing_codigo(json!({ "nombre": "Sin codigo" }))]
#[case::blank_codigo(json!({ "codigo": "   ", "nombre": "Blanco" }))]
#[case::blank_nombre(json!({ "codigo": "ALM-X", "nombre": "" }))]
#[case::wrong_type(json!({ "codigo": 12, "nombre": "Numero" }))]
#[tokio::test]
async fn invalid_almacen_is_rejected_and_not_stored(#[case] payload: serde_json::Value) {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/almacenes", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");

    let (_, list) = app.get("/api/almacenes").await;
    assert_eq!(list["pagination"]["total"], 0);
}

#[tokio::test]
async fn malformed_json_body_is_a_bad_request() {
    let app = TestApp::new().await;
    let response = app
        .request_raw(Method::POST, "/api/almacenes", "{\"codigo\": ")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_codigo_conflicts_and_keeps_first_record() {
    let app = TestApp::new().await;
    app.create(
        "/api/almacenes",
        json!({ "codigo": "ALM-01", "nombre": "Primero" }),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/almacenes",
            json!({ "codigo": "ALM-01", "nombre": "Segundo" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("ALM-01"));

    let (_, stored) = app.get("/api/almacenes/codigo/ALM-01").await;
    assert_eq!(stored["nombre"], "Primero");
    let (_, list) = app.get("/api/almacenes").await;
    assert_eq!(list["pagination"]["total"], 1);
}

#[tokio::test]
async fn renaming_onto_an_existing_codigo_conflicts() {
    let app = TestApp::new().await;
    app.create("/api/almacenes", json!({ "codigo": "A", "nombre": "A" }))
        .await;
    let b = app
        .create("/api/almacenes", json!({ "codigo": "B", "nombre": "B" }))
        .await;
    let b_id = b["id"].as_str().unwrap();

    let (status, _) = app
        .put(&format!("/api/almacenes/{b_id}"), json!({ "codigo": "A" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Keeping its own codigo is not a conflict
    let (status, _) = app
        .put(&format!("/api/almacenes/{b_id}"), json!({ "codigo": "B" }))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn list_paginates_filters_and_clamps_page_size() {
    let app = TestApp::with_config(|cfg| cfg.api_max_page_size = 3).await;
    for n in 1..=5 {
        app.create(
            "/api/almacenes",
            json!({ "codigo": format!("ALM-{n:02}"), "nombre": format!("Almacén {n}"), "activo": n % 2 == 1 }),
        )
        .await;
    }

    let (status, page) = app.get("/api/almacenes?page=2&perPage=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
    assert_eq!(page["data"][0]["codigo"], "ALM-03");
    assert_eq!(page["pagination"]["totalPages"], 3);

    let (_, clamped) = app.get("/api/almacenes?perPage=50").await;
    assert_eq!(clamped["pagination"]["perPage"], 3);
    assert_eq!(clamped["data"].as_array().unwrap().len(), 3);

    let (_, activos) = app.get("/api/almacenes?activo=true").await;
    assert_eq!(activos["pagination"]["total"], 3);

    let (_, search) = app.get("/api/almacenes?search=ALM-04").await;
    assert_eq!(search["pagination"]["total"], 1);
}

#[tokio::test]
async fn unknown_ids_and_codigos_are_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app
        .get(&format!("/api/formas-pago/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["timestamp"].is_string());

    let (status, _) = app.get("/api/vendedores/codigo/NADIE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app
        .request(Method::GET, "/api/productos-sage/not-a-uuid", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn formas_pago_crud() {
    let app = TestApp::new().await;
    let created = app
        .create(
            "/api/formas-pago",
            json!({ "codigo": "CONTADO", "nombre": "Contado" }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app
        .post(
            "/api/formas-pago",
            json!({ "codigo": "CONTADO", "nombre": "Otra" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = app
        .put(&format!("/api/formas-pago/{id}"), json!({ "activo": false }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["activo"], false);
    assert_eq!(updated["nombre"], "Contado");
}

#[tokio::test]
async fn vendedor_email_is_validated() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/vendedores",
            json!({ "codigo": "V1", "nombre": "Ana", "email": "no-es-un-email" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let created = app
        .create(
            "/api/vendedores",
            json!({ "codigo": "V1", "nombre": "Ana", "email": "ana@carniceria.es" }),
        )
        .await;
    assert_eq!(created["email"], "ana@carniceria.es");
    let id = created["id"].as_str().unwrap();

    let (status, cleared) = app
        .put(&format!("/api/vendedores/{id}"), json!({ "email": "  " }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["email"].is_null());
}

#[tokio::test]
async fn blank_vendedor_email_is_treated_as_absent() {
    let app = TestApp::new().await;
    let created = app
        .create(
            "/api/vendedores",
            json!({ "codigo": "V2", "nombre": "Luis", "email": "" }),
        )
        .await;
    assert!(created["email"].is_null());
}

#[tokio::test]
async fn producto_sage_precio_defaults_and_rejects_negative() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/productos-sage",
            json!({ "codigo": "P-1", "nombre": "Chuletón", "precio": -1 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let sin_precio = app
        .create(
            "/api/productos-sage",
            json!({ "codigo": "P-1", "nombre": "Chuletón", "codigoSage": "SG-100" }),
        )
        .await;
    assert_eq!(decimal(&sin_precio["precio"]), rust_decimal::Decimal::ZERO);

    let con_precio = app
        .create(
            "/api/productos-sage",
            json!({ "codigo": "P-2", "nombre": "Lomo", "precio": "12.95" }),
        )
        .await;
    assert_eq!(
        decimal(&con_precio["precio"]),
        rust_decimal_macros::dec!(12.95)
    );

    let (_, by_sage) = app.get("/api/productos-sage?search=SG-100").await;
    assert_eq!(by_sage["pagination"]["total"], 1);
    assert_eq!(by_sage["data"][0]["codigo"], "P-1");
}

#[rstest]
#[case::overflows_u64("/api/almacenes?page=18446744073709551615&perPage=20")]
#[case::past_sql_offset("/api/almacenes?page=922337203685477581&perPage=20")]
#[case::recetas("/api/recetas?page=18446744073709551615")]
#[case::historial("/api/historial-proveedor?tiendaId=T-01&page=18446744073709551615")]
#[tokio::test]
async fn out_of_range_page_is_a_bad_request(#[case] uri: &str) {
    let app = TestApp::new().await;
    let (status, body) = app.get(uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("out of range"));
}

#[rstest]
#[case::page("/api/almacenes?page=abc")]
#[case::activo("/api/vendedores?activo=quizas")]
#[case::producto("/api/stock?producto=not-a-uuid")]
#[case::desde("/api/historial-proveedor?tiendaId=T-01&desde=ayer")]
#[tokio::test]
async fn malformed_query_strings_use_the_error_body(#[case] uri: &str) {
    let app = TestApp::new().await;
    let (status, body) = app.get(uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert!(body["timestamp"].is_string());
}
