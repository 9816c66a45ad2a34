use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{VehicleStore, DUPLICATE_PLATE_MESSAGE, PLATE_TAKEN_BY_OTHER_MESSAGE};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleStatistics};
use crate::utils::errors::{conflict_error, AppResult};

/// Almacén en memoria. La placa única se verifica bajo el lock de escritura,
/// así que dos inserciones concurrentes con la misma placa nunca pasan ambas.
#[derive(Default)]
pub struct InMemoryVehicleStore {
    vehicles: RwLock<HashMap<Uuid, Vehicle>>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn plate_taken(vehicles: &HashMap<Uuid, Vehicle>, plate: &str, exclude_id: Option<Uuid>) -> bool {
    vehicles
        .values()
        .any(|v| v.plate == plate && Some(v.id) != exclude_id)
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut list: Vec<Vehicle> = vehicles.values().cloned().collect();
        list.sort_by(|a, b| {
            b.intake_date
                .cmp(&a.intake_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(list)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicles.read().await.get(&id).cloned())
    }

    async fn plate_exists(&self, plate: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        Ok(plate_taken(&*self.vehicles.read().await, plate, exclude_id))
    }

    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        if plate_taken(&vehicles, &vehicle.plate, None) {
            return Err(conflict_error(DUPLICATE_PLATE_MESSAGE));
        }

        let vehicle = vehicle.into_vehicle(Uuid::new_v4(), Utc::now());
        vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn save(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        if plate_taken(&vehicles, &vehicle.plate, Some(vehicle.id)) {
            return Err(conflict_error(PLATE_TAKEN_BY_OTHER_MESSAGE));
        }

        let Some(stored) = vehicles.get_mut(&vehicle.id) else {
            return Ok(None);
        };

        // Fecha de ingreso y creación se conservan del registro almacenado
        *stored = Vehicle {
            intake_date: stored.intake_date,
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..vehicle.clone()
        };
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicles.write().await.remove(&id))
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let mut vehicles = self.vehicles.write().await;
        let removed = vehicles.len() as u64;
        vehicles.clear();
        Ok(removed)
    }

    async fn statistics(&self) -> AppResult<VehicleStatistics> {
        let vehicles = self.vehicles.read().await;
        Ok(VehicleStatistics::from_costs(
            vehicles.values().map(|v| &v.repair_cost),
        ))
    }
}
