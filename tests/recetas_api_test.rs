mod common;

use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;

use common::{decimal, TestApp};

#[tokio::test]
async fn receta_lifecycle_with_ingredients() {
    let app = TestApp::new().await;
    let producto_final = Uuid::new_v4();
    let ternera = Uuid::new_v4();
    let cerdo = Uuid::new_v4();

    let created = app
        .create(
            "/api/recetas",
            json!({
                "nombre": "Hamburguesa mixta",
                "productoFinal": producto_final,
                "ingredientes": [
                    { "producto": ternera, "cantidad": "0.6", "unidad": "kg" },
                    { "producto": cerdo, "cantidad": 0.4, "unidad": "kg" }
                ]
            }),
        )
        .await;
    assert_eq!(created["productoFinal"], producto_final.to_string());
    let ingredientes = created["ingredientes"].as_array().expect("ingredientes");
    assert_eq!(ingredientes.len(), 2);
    assert_eq!(decimal(&ingredientes[0]["cantidad"]), dec!(0.6));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, by_nombre) = app.get("/api/recetas/nombre/Hamburguesa%20mixta").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_nombre["id"], id.as_str());

    let (status, updated) = app
        .put(
            &format!("/api/recetas/{id}"),
            json!({ "ingredientes": [{ "producto": ternera, "cantidad": 1, "unidad": "kg" }] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ingredientes"].as_array().unwrap().len(), 1);
    assert_eq!(updated["nombre"], "Hamburguesa mixta");

    let (_, filtered) = app
        .get(&format!("/api/recetas?productoFinal={producto_final}"))
        .await;
    assert_eq!(filtered["pagination"]["total"], 1);

    assert_eq!(
        app.delete(&format!("/api/recetas/{id}")).await,
        StatusCode::NO_CONTENT
    );
    let (status, _) = app.get("/api/recetas/nombre/Hamburguesa%20mixta").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn receta_without_ingredients_is_allowed() {
    let app = TestApp::new().await;
    let created = app
        .create(
            "/api/recetas",
            json!({ "nombre": "Pendiente", "productoFinal": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(created["ingredientes"], json!([]));
}

#[tokio::test]
async fn non_positive_ingredient_quantity_is_rejected() {
    let app = TestApp::new().await;
    for cantidad in [json!(0), json!("-2")] {
        let (status, _) = app
            .post(
                "/api/recetas",
                json!({
                    "nombre": "Mala",
                    "productoFinal": Uuid::new_v4(),
                    "ingredientes": [{ "producto": Uuid::new_v4(), "cantidad": cantidad, "unidad": "kg" }]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, list) = app.get("/api/recetas").await;
    assert_eq!(list["pagination"]["total"], 0);
}

#[tokio::test]
async fn invalid_ingredient_in_update_leaves_recipe_untouched() {
    let app = TestApp::new().await;
    let created = app
        .create(
            "/api/recetas",
            json!({
                "nombre": "Chorizo",
                "productoFinal": Uuid::new_v4(),
                "ingredientes": [{ "producto": Uuid::new_v4(), "cantidad": 1, "unidad": "kg" }]
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app
        .put(
            &format!("/api/recetas/{id}"),
            json!({ "ingredientes": [{ "producto": Uuid::new_v4(), "cantidad": 1, "unidad": " " }] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = app.get(&format!("/api/recetas/{id}")).await;
    assert_eq!(stored["ingredientes"][0]["unidad"], "kg");
}

#[tokio::test]
async fn duplicate_receta_nombre_conflicts() {
    let app = TestApp::new().await;
    app.create(
        "/api/recetas",
        json!({ "nombre": "Salchicha", "productoFinal": Uuid::new_v4() }),
    )
    .await;

    let (status, _) = app
        .post(
            "/api/recetas",
            json!({ "nombre": "  Salchicha ", "productoFinal": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
