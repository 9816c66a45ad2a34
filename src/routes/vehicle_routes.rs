use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::api_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse, VehicleStatisticsResponse,
};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError, AppResult};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/statistics", get(get_statistics))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

/// El cuerpo mal formado se responde con el mismo sobre de error
fn body_or_bad_request<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!("Cuerpo JSON rechazado: {}", rejection.body_text());
        bad_request_error("El cuerpo de la solicitud no es un JSON válido")
    })
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, AppError> {
    let vehicles = state.vehicle_controller().list().await?;
    let data: Vec<VehicleResponse> = vehicles.into_iter().map(VehicleResponse::from).collect();
    Ok(Json(ApiResponse::list(data)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let vehicle = state.vehicle_controller().get_by_id(&id).await?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

async fn create_vehicle(
    State(state): State<AppState>,
    body: Result<Json<CreateVehicleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let request = body_or_bad_request(body)?;
    let vehicle = state.vehicle_controller().create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            vehicle.into(),
            "Carro creado exitosamente",
        )),
    ))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateVehicleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let request = body_or_bad_request(body)?;
    let vehicle = state.vehicle_controller().update(&id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle.into(),
        "Carro actualizado exitosamente",
    )))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let vehicle = state.vehicle_controller().delete(&id).await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle.into(),
        "Carro eliminado exitosamente",
    )))
}

async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<VehicleStatisticsResponse>>, AppError> {
    let stats = state.vehicle_controller().statistics().await?;
    Ok(Json(ApiResponse::success(stats.into())))
}
