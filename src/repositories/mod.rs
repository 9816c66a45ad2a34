//! Almacenes de carros
//!
//! El trait `VehicleStore` es la frontera con el almacén persistente.
//! La restricción de placa única la hace cumplir el propio almacén:
//! cualquier violación se devuelve como `AppError::Conflict`.

pub mod memory_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleStatistics};
use crate::utils::errors::AppResult;

pub use memory_repository::InMemoryVehicleStore;
pub use vehicle_repository::PgVehicleStore;

/// Mensaje de conflicto cuando el almacén rechaza una placa duplicada
pub const DUPLICATE_PLATE_MESSAGE: &str = "La placa ya existe en el sistema";

/// Mensaje de conflicto cuando la placa editada pertenece a otro carro
pub const PLATE_TAKEN_BY_OTHER_MESSAGE: &str = "La placa ya existe en otro carro";

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Todos los carros, del ingreso más reciente al más antiguo
    async fn list(&self) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Indica si otra fila usa la placa, ignorando `exclude_id`
    async fn plate_exists(&self, plate: &str, exclude_id: Option<Uuid>) -> AppResult<bool>;

    /// Inserta con id y fecha de ingreso asignados por el almacén
    async fn insert(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    /// Persiste todos los campos editables; `None` si el carro ya no existe
    async fn save(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>>;

    /// Borrado definitivo; devuelve la copia eliminada
    async fn delete(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    async fn delete_all(&self) -> AppResult<u64>;

    async fn statistics(&self) -> AppResult<VehicleStatistics>;
}
