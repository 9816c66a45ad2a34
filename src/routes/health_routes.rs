//! Rutas de bienvenida, salud y rutas no encontradas

use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/api/health", get(health_check))
}

/// Documento de bienvenida con el mapa de endpoints
async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Bienvenido a la API CARSON - Sistema de Gestión de Inventario de Carros",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "carros": "/vehicles",
            "estadisticas": "/vehicles/statistics",
            "health": "/api/health",
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Manejo de rutas no encontradas
pub async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Ruta no encontrada",
        })),
    )
}
