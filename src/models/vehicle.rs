//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle (carro en reparación) y sus
//! variantes para las operaciones CRUD.
//! Mapea exactamente a la tabla `vehicles` de las migraciones.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::FromRow;
use uuid::Uuid;

/// Carro registrado en el inventario
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub color: String,
    pub intake_date: DateTime<Utc>,
    pub repair_cost: Decimal,
    pub damage_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos ya validados y normalizados para insertar un carro nuevo
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub color: String,
    pub repair_cost: Decimal,
    pub damage_description: String,
}

impl NewVehicle {
    /// Construye el registro completo; la fecha de ingreso es el momento de creación
    pub fn into_vehicle(self, id: Uuid, now: DateTime<Utc>) -> Vehicle {
        Vehicle {
            id,
            make: self.make,
            model: self.model,
            year: self.year,
            plate: self.plate,
            color: self.color,
            intake_date: now,
            repair_cost: self.repair_cost,
            damage_description: self.damage_description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Cambios validados de una actualización parcial
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleChanges {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub plate: Option<String>,
    pub color: Option<String>,
    pub repair_cost: Option<Decimal>,
    pub damage_description: Option<String>,
}

impl VehicleChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Aplica los cambios; `id`, `intake_date` y `created_at` nunca se tocan
    pub fn apply_to(self, vehicle: &mut Vehicle) {
        if let Some(make) = self.make {
            vehicle.make = make;
        }
        if let Some(model) = self.model {
            vehicle.model = model;
        }
        if let Some(year) = self.year {
            vehicle.year = year;
        }
        if let Some(plate) = self.plate {
            vehicle.plate = plate;
        }
        if let Some(color) = self.color {
            vehicle.color = color;
        }
        if let Some(repair_cost) = self.repair_cost {
            vehicle.repair_cost = repair_cost;
        }
        if let Some(damage_description) = self.damage_description {
            vehicle.damage_description = damage_description;
        }
    }
}

/// Agregados de costos sobre todo el inventario
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct VehicleStatistics {
    pub count: i64,
    pub total: Decimal,
    pub average: Decimal,
}

impl VehicleStatistics {
    /// Calcula los agregados; con cero carros total y promedio valen 0.
    /// El promedio se redondea a centavos, igual que `ROUND(AVG(..), 2)`.
    pub fn from_costs<'a>(costs: impl IntoIterator<Item = &'a Decimal>) -> Self {
        let (count, total) = costs
            .into_iter()
            .fold((0i64, Decimal::ZERO), |(n, sum), cost| (n + 1, sum + *cost));

        let average = if count == 0 {
            Decimal::ZERO
        } else {
            (total / Decimal::from(count))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        Self { count, total, average }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vehicle {
        NewVehicle {
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            plate: "ABC-1234".to_string(),
            color: "Blanco".to_string(),
            repair_cost: Decimal::from(450_000),
            damage_description: "Golpe frontal, parachoques dañado".to_string(),
        }
        .into_vehicle(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_empty_changes_leave_vehicle_untouched() {
        let original = sample();
        let mut vehicle = original.clone();

        let changes = VehicleChanges::default();
        assert!(changes.is_empty());
        changes.apply_to(&mut vehicle);

        assert_eq!(vehicle, original);
    }

    #[test]
    fn test_changes_only_touch_supplied_fields() {
        let original = sample();
        let mut vehicle = original.clone();

        VehicleChanges {
            color: Some("Rojo".to_string()),
            year: Some(2021),
            ..Default::default()
        }
        .apply_to(&mut vehicle);

        assert_eq!(vehicle.color, "Rojo");
        assert_eq!(vehicle.year, 2021);
        assert_eq!(vehicle.plate, original.plate);
        assert_eq!(vehicle.intake_date, original.intake_date);
    }

    #[test]
    fn test_statistics_from_costs() {
        let empty = VehicleStatistics::from_costs(&[]);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.total, Decimal::ZERO);
        assert_eq!(empty.average, Decimal::ZERO);

        let costs = [Decimal::from(450_000), Decimal::from(850_000)];
        let stats = VehicleStatistics::from_costs(&costs);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total, Decimal::from(1_300_000));
        assert_eq!(stats.average, Decimal::from(650_000));
    }

    #[test]
    fn test_statistics_average_rounds_half_away_from_zero() {
        let thirds = [Decimal::ONE, Decimal::ONE, Decimal::TWO];
        let stats = VehicleStatistics::from_costs(&thirds);
        assert_eq!(stats.total, Decimal::from(4));
        assert_eq!(stats.average, Decimal::new(133, 2));

        // Promedio de 0.005: PostgreSQL redondea a 0.01
        let half_cent = [Decimal::new(1, 2), Decimal::ZERO];
        let stats = VehicleStatistics::from_costs(&half_cent);
        assert_eq!(stats.average, Decimal::new(1, 2));
    }
}
