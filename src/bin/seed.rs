//! Carga de datos de ejemplo
//!
//! Vacía el almacén configurado e inserta cinco carros de ejemplo
//! pasando por las mismas validaciones que la API.

use anyhow::Result;
use dotenvy::dotenv;
use rust_decimal::prelude::ToPrimitive;
use tracing::info;

use carson::config::EnvironmentConfig;
use carson::controllers::vehicle_controller::VehicleController;
use carson::database::connect_store;
use carson::dto::vehicle_dto::CreateVehicleRequest;

fn sample(
    make: &str,
    model: &str,
    year: i32,
    plate: &str,
    color: &str,
    repair_cost: f64,
    damage_description: &str,
) -> CreateVehicleRequest {
    CreateVehicleRequest {
        make: Some(make.to_string()),
        model: Some(model.to_string()),
        year: Some(year.into()),
        plate: Some(plate.to_string()),
        color: Some(color.to_string()),
        repair_cost: Some(repair_cost.into()),
        damage_description: Some(damage_description.to_string()),
    }
}

fn sample_vehicles() -> Vec<CreateVehicleRequest> {
    vec![
        sample(
            "Toyota",
            "Corolla",
            2020,
            "ABC-1234",
            "Blanco",
            450000.0,
            "Golpe frontal, parachoques dañado, necesita pintura y alineación",
        ),
        sample(
            "Honda",
            "Civic",
            2019,
            "XYZ-5678",
            "Negro",
            850000.0,
            "Accidente trasero, baúl abollado, luces traseras rotas, necesita estructura",
        ),
        sample(
            "Chevrolet",
            "Spark",
            2018,
            "DEF-9012",
            "Rojo",
            320000.0,
            "Puerta lateral rayada, espejo roto, necesita pintura y reemplazo de vidrio",
        ),
        sample(
            "Renault",
            "Logan",
            2021,
            "GHI-3456",
            "Gris",
            650000.0,
            "Motor con problemas, cambio de aceite, filtros, bujías y diagnóstico completo",
        ),
        sample(
            "Hyundai",
            "Accent",
            2017,
            "JKL-7890",
            "Azul",
            520000.0,
            "Transmisión con ruido, cambio de fluido, inspección de embrague requerida",
        ),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().init();

    let config = EnvironmentConfig::from_env()?;
    let store = connect_store(config.store_backend).await?;

    let removed = store.delete_all().await?;
    info!("🧹 Colección limpiada ({} carros eliminados)", removed);

    let controller = VehicleController::new(store);
    let samples = sample_vehicles();
    let inserted = samples.len();
    for request in samples {
        controller.create(request).await?;
    }
    info!("✅ {} carros insertados exitosamente", inserted);

    let stats = controller.statistics().await?;
    info!("--- Estadísticas ---");
    info!("Total de carros: {}", stats.count);
    info!("Costo total: ${}", stats.total);
    info!(
        "Costo promedio: ${}",
        stats.average.round().to_i64().unwrap_or_default()
    );

    Ok(())
}
