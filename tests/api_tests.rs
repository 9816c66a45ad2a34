use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use carson::build_app;
use carson::config::{EnvironmentConfig, StoreBackend};
use carson::repositories::InMemoryVehicleStore;
use carson::state::AppState;

fn create_test_app() -> Router {
    let config = EnvironmentConfig {
        store_backend: StoreBackend::Memory,
        ..EnvironmentConfig::default()
    };
    build_app(AppState::new(Arc::new(InMemoryVehicleStore::new()), config))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn vehicle_body(plate: &str, repair_cost: f64) -> Value {
    json!({
        "make": "Honda",
        "model": "Civic",
        "year": 2019,
        "plate": plate,
        "color": "Negro",
        "repairCost": repair_cost,
        "damageDescription": "Accidente trasero, baúl abollado"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_welcome_lists_endpoints() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["carros"], "/vehicles");
}

#[tokio::test]
async fn test_unknown_route_uses_envelope() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/no-existe", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Ruta no encontrada" }));
}

#[tokio::test]
async fn test_crud_flow() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/vehicles",
        Some(vehicle_body("xyz-5678", 850000.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Carro creado exitosamente");
    assert_eq!(body["data"]["plate"], "XYZ-5678");
    assert_eq!(body["data"]["repairCost"].as_f64(), Some(850000.0));
    assert!(body["data"]["intakeDate"].is_string());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, &format!("/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, body) = send(&app, Method::GET, "/vehicles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/vehicles/{}", id),
        Some(json!({ "color": "Gris", "year": "2018" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Carro actualizado exitosamente");
    assert_eq!(body["data"]["color"], "Gris");
    assert_eq!(body["data"]["year"], 2018);
    assert_eq!(body["data"]["make"], "Honda");

    let (status, body) = send(&app, Method::DELETE, &format!("/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Carro eliminado exitosamente");
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, body) = send(&app, Method::GET, &format!("/vehicles/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Carro no encontrado");
}

#[tokio::test]
async fn test_create_validation_and_conflict_codes() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/vehicles",
        Some(json!({ "make": "Honda" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Todos los campos son requeridos");
    assert!(body["error"].as_str().unwrap().contains("plate"));

    let mut invalid_year = vehicle_body("ABC-1234", 1.0);
    invalid_year["year"] = json!(1899);
    let (status, body) = send(&app, Method::POST, "/vehicles", Some(invalid_year)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("El año debe estar entre 1900"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/vehicles",
        Some(vehicle_body("abc-1234", 1.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/vehicles",
        Some(vehicle_body("ABC-1234", 1.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "La placa ya existe en el sistema");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/vehicles")
        .header("content-type", "application/json")
        .body(Body::from("{ esto no es json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_errors() {
    let app = create_test_app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/vehicles",
        Some(vehicle_body("UPD-0001", 1.0)),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    send(&app, Method::POST, "/vehicles", Some(vehicle_body("UPD-0002", 1.0))).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/vehicles/{}", id),
        Some(json!({ "repairCost": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/vehicles/{}", id),
        Some(json!({ "plate": "upd-0002" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "La placa ya existe en otro carro");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/vehicles/64f1c2e8a1b2c3d4e5f60718",
        Some(json!({ "color": "Azul" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_is_not_found() {
    let app = create_test_app();
    let uri = format!("/vehicles/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_statistics_endpoint() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/vehicles/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["count"], 0);
    assert_eq!(body["data"]["total"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["average"].as_f64(), Some(0.0));

    send(&app, Method::POST, "/vehicles", Some(vehicle_body("STA-0001", 450000.0))).await;
    send(&app, Method::POST, "/vehicles", Some(vehicle_body("STA-0002", 850000.0))).await;

    let (_, body) = send(&app, Method::GET, "/vehicles/statistics", None).await;
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["total"].as_f64(), Some(1300000.0));
    assert_eq!(body["data"]["average"].as_f64(), Some(650000.0));
}

#[tokio::test]
async fn test_repair_cost_above_column_limit_is_bad_request() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/vehicles",
        Some(vehicle_body("MAX-0001", 999_999_999_999.99)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut too_expensive = vehicle_body("MAX-0002", 0.0);
    too_expensive["repairCost"] = json!("1000000000000.00");
    let (status, body) = send(&app, Method::POST, "/vehicles", Some(too_expensive)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Campos inválidos: repairCost");
}
