use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleStatistics};

/// Valor numérico recibido desde un formulario: número JSON o texto
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Un texto vacío cuenta como campo ausente
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericInput::Text(text) if text.trim().is_empty())
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        NumericInput::Number(f64::from(value))
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

// Request para crear un carro
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<NumericInput>,
    pub plate: Option<String>,
    pub color: Option<String>,
    pub repair_cost: Option<NumericInput>,
    pub damage_description: Option<String>,
}

// Request para actualizar un carro: solo cambian los campos presentes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<NumericInput>,
    pub plate: Option<String>,
    pub color: Option<String>,
    pub repair_cost: Option<NumericInput>,
    pub damage_description: Option<String>,
}

// Response de carro
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
    pub color: String,
    pub intake_date: DateTime<Utc>,
    pub repair_cost: f64,
    pub damage_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            plate: vehicle.plate,
            color: vehicle.color,
            intake_date: vehicle.intake_date,
            repair_cost: vehicle.repair_cost.to_f64().unwrap_or_default(),
            damage_description: vehicle.damage_description,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

// Estadísticas de costos de reparación
#[derive(Debug, Serialize)]
pub struct VehicleStatisticsResponse {
    pub count: i64,
    pub total: f64,
    pub average: f64,
}

impl From<VehicleStatistics> for VehicleStatisticsResponse {
    fn from(stats: VehicleStatistics) -> Self {
        Self {
            count: stats.count,
            total: stats.total.to_f64().unwrap_or_default(),
            average: stats.average.to_f64().unwrap_or_default(),
        }
    }
}
