use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::ValidationError;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges, VehicleStatistics};
use crate::repositories::{VehicleStore, DUPLICATE_PLATE_MESSAGE, PLATE_TAKEN_BY_OTHER_MESSAGE};
use crate::utils::errors::{
    conflict_error, missing_fields_error, not_found_error, validation_error, AppResult,
};
use crate::utils::validation::{
    normalize_plate, normalize_text, parse_cost, parse_year, validate_damage_description,
    validate_make, validate_model, validate_plate, validate_uuid,
};

/// Orquesta las operaciones CRUD y de estadísticas sobre el almacén.
/// No guarda estado propio entre solicitudes.
pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Vehicle> {
        let id = parse_vehicle_id(id)?;
        self.store.find_by_id(id).await?.ok_or_else(not_found_error)
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let new_vehicle = validate_create(request)?;

        // Verificar si la placa ya existe
        if self.store.plate_exists(&new_vehicle.plate, None).await? {
            return Err(conflict_error(DUPLICATE_PLATE_MESSAGE));
        }

        // El índice único del almacén resuelve las carreras entre solicitudes
        let vehicle = self.store.insert(new_vehicle).await?;
        info!("🚗 Carro creado: {} ({})", vehicle.plate, vehicle.id);
        Ok(vehicle)
    }

    pub async fn update(&self, id: &str, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        let id = parse_vehicle_id(id)?;
        let current = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(not_found_error)?;

        // Todo se valida antes de tocar el registro
        let changes = validate_update(request)?;
        if changes.is_empty() {
            return Ok(current);
        }

        if let Some(plate) = &changes.plate {
            if *plate != current.plate && self.store.plate_exists(plate, Some(id)).await? {
                return Err(conflict_error(PLATE_TAKEN_BY_OTHER_MESSAGE));
            }
        }

        let mut updated = current;
        changes.apply_to(&mut updated);

        let vehicle = self
            .store
            .save(&updated)
            .await?
            .ok_or_else(not_found_error)?;
        info!("✏️ Carro actualizado: {} ({})", vehicle.plate, vehicle.id);
        Ok(vehicle)
    }

    pub async fn delete(&self, id: &str) -> AppResult<Vehicle> {
        let id = parse_vehicle_id(id)?;
        let vehicle = self.store.delete(id).await?.ok_or_else(not_found_error)?;
        info!("🗑️ Carro eliminado: {} ({})", vehicle.plate, vehicle.id);
        Ok(vehicle)
    }

    pub async fn statistics(&self) -> AppResult<VehicleStatistics> {
        self.store.statistics().await
    }
}

/// Un id mal formado equivale a un carro inexistente
fn parse_vehicle_id(id: &str) -> AppResult<Uuid> {
    validate_uuid(id).map_err(|_| not_found_error())
}

/// Validación completa de creación: primero los obligatorios en una sola
/// pasada, luego cada campo por separado.
fn validate_create(request: CreateVehicleRequest) -> AppResult<NewVehicle> {
    let required = (
        normalize_text(request.make.as_deref()),
        normalize_text(request.model.as_deref()),
        request.year.filter(|v| !v.is_blank()),
        normalize_text(request.plate.as_deref()).map(|p| normalize_plate(&p)),
        normalize_text(request.color.as_deref()),
        request.repair_cost.filter(|v| !v.is_blank()),
        normalize_text(request.damage_description.as_deref()),
    );

    let (make, model, year, plate, color, repair_cost, damage_description) = match required {
        (
            Some(make),
            Some(model),
            Some(year),
            Some(plate),
            Some(color),
            Some(repair_cost),
            Some(damage_description),
        ) => (make, model, year, plate, color, repair_cost, damage_description),
        (make, model, year, plate, color, repair_cost, damage_description) => {
            // Aquí falta al menos uno, así que la lista nunca queda vacía
            let missing: Vec<&'static str> = [
                ("make", make.is_none()),
                ("model", model.is_none()),
                ("year", year.is_none()),
                ("plate", plate.is_none()),
                ("color", color.is_none()),
                ("repairCost", repair_cost.is_none()),
                ("damageDescription", damage_description.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            return Err(missing_fields_error(&missing));
        }
    };

    let year = parse_year(&year).map_err(|e| validation_error("year", e))?;
    let repair_cost = parse_cost(&repair_cost).map_err(|e| validation_error("repairCost", e))?;
    validate_damage_description(&damage_description)
        .map_err(|e| validation_error("damageDescription", e))?;
    validate_make(&make).map_err(|e| validation_error("make", e))?;
    validate_model(&model).map_err(|e| validation_error("model", e))?;
    validate_plate(&plate).map_err(|e| validation_error("plate", e))?;

    Ok(NewVehicle {
        make,
        model,
        year,
        plate,
        color,
        repair_cost,
        damage_description,
    })
}

/// Valida solo los campos presentes. Un campo presente pero vacío es inválido.
fn validate_update(request: UpdateVehicleRequest) -> AppResult<VehicleChanges> {
    let mut changes = VehicleChanges::default();

    if let Some(make) = request.make {
        let make = make.trim().to_string();
        validate_make(&make).map_err(|e| validation_error("make", e))?;
        changes.make = Some(make);
    }

    if let Some(model) = request.model {
        let model = model.trim().to_string();
        validate_model(&model).map_err(|e| validation_error("model", e))?;
        changes.model = Some(model);
    }

    if let Some(year) = request.year {
        changes.year = Some(parse_year(&year).map_err(|e| validation_error("year", e))?);
    }

    if let Some(plate) = request.plate {
        let plate = normalize_plate(&plate);
        validate_plate(&plate).map_err(|e| validation_error("plate", e))?;
        changes.plate = Some(plate);
    }

    if let Some(color) = request.color {
        let color = normalize_text(Some(&color)).ok_or_else(|| {
            let mut error = ValidationError::new("required");
            error.message = Some("El color es requerido".into());
            validation_error("color", error)
        })?;
        changes.color = Some(color);
    }

    if let Some(repair_cost) = request.repair_cost {
        changes.repair_cost =
            Some(parse_cost(&repair_cost).map_err(|e| validation_error("repairCost", e))?);
    }

    if let Some(description) = request.damage_description {
        let description = description.trim().to_string();
        validate_damage_description(&description)
            .map_err(|e| validation_error("damageDescription", e))?;
        changes.damage_description = Some(description);
    }

    Ok(changes)
}
