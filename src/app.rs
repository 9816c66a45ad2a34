//! Construcción del router de la API
//!
//! `main.rs` y las pruebas de integración usan este mismo router.

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware_with_origins;
use crate::routes::{health_routes, vehicle_routes};
use crate::state::AppState;

pub fn build_app(state: AppState) -> Router {
    let cors = cors_middleware_with_origins(&state.config.cors_origins);

    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .fallback(health_routes::route_not_found)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
