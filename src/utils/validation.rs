//! Utilidades de validación
//!
//! Funciones puras que limpian y validan cada campo de un carro
//! antes de cualquier acceso al almacén.

use std::str::FromStr;

use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use num_traits::Zero;
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidationError;

use crate::dto::vehicle_dto::NumericInput;

/// Primer año aceptado para un carro
pub const MIN_YEAR: i32 = 1900;

/// Longitud mínima de marca y modelo
pub const MIN_NAME_LENGTH: usize = 2;

/// Longitud mínima de la descripción de daños
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

lazy_static! {
    static ref PLATE_PATTERN: Regex = Regex::new(r"^[A-Z0-9\-]{4,10}$").unwrap();

    /// Mayor costo que cabe en la columna `NUMERIC(14, 2)`
    pub static ref MAX_REPAIR_COST: Decimal = Decimal::new(99_999_999_999_999, 2);
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Último año aceptado: el año en curso más uno
pub fn max_year() -> i32 {
    Utc::now().year() + 1
}

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Limpia un texto; vacío tras recortar se trata como ausente
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Recorta y pasa a mayúsculas. El formato se valida aparte
pub fn normalize_plate(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Validar formato de placa ya normalizada
pub fn validate_plate(plate: &str) -> Result<(), ValidationError> {
    if !PLATE_PATTERN.is_match(plate) {
        let mut error = field_error(
            "plate",
            "La placa debe tener entre 4 y 10 caracteres (letras, números o guiones)".to_string(),
        );
        error.add_param("value".into(), &plate.to_string());
        return Err(error);
    }
    Ok(())
}

/// Convierte el año y verifica el rango [1900, año actual + 1]
pub fn parse_year(raw: &NumericInput) -> Result<i32, ValidationError> {
    parse_year_with_max(raw, max_year())
}

fn parse_year_with_max(raw: &NumericInput, max: i32) -> Result<i32, ValidationError> {
    let invalid = || {
        let mut error = field_error(
            "year",
            format!("El año debe estar entre {} y {}", MIN_YEAR, max),
        );
        error.add_param("min".into(), &MIN_YEAR);
        error.add_param("max".into(), &max);
        error
    };

    let year = match raw {
        NumericInput::Number(n) if n.is_finite() && n.fract() == 0.0 => *n,
        NumericInput::Number(_) => return Err(invalid()),
        NumericInput::Text(text) => text.trim().parse::<i64>().map_err(|_| invalid())? as f64,
    };

    if year < f64::from(MIN_YEAR) || year > f64::from(max) {
        return Err(invalid());
    }
    Ok(year as i32)
}

/// Convierte el costo a decimal (2 decimales) dentro de [0, MAX_REPAIR_COST]
pub fn parse_cost(raw: &NumericInput) -> Result<Decimal, ValidationError> {
    let invalid = || {
        field_error(
            "repair_cost",
            "El costo de reparación debe ser un número positivo".to_string(),
        )
    };

    let cost = match raw {
        NumericInput::Number(n) if n.is_finite() => Decimal::from_f64(*n).ok_or_else(invalid)?,
        NumericInput::Number(_) => return Err(invalid()),
        NumericInput::Text(text) => Decimal::from_str(text.trim()).map_err(|_| invalid())?,
    };

    validate_non_negative(cost).map_err(|_| invalid())?;

    let cost = cost.round_dp(2);
    if cost > *MAX_REPAIR_COST {
        let mut error = field_error(
            "repair_cost",
            format!("El costo de reparación no puede superar {}", *MAX_REPAIR_COST),
        );
        error.add_param("max".into(), &MAX_REPAIR_COST.to_string());
        return Err(error);
    }
    Ok(cost)
}

/// Validar longitud mínima en caracteres
pub fn require_min_length(
    value: &str,
    min: usize,
    message: &str,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        let mut error = field_error("length", message.to_string());
        error.add_param("min".into(), &min);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + Zero>(value: T) -> Result<(), ValidationError> {
    if value < T::zero() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

/// Validar marca: recortada y con al menos 2 caracteres
pub fn validate_make(make: &str) -> Result<(), ValidationError> {
    require_min_length(
        make,
        MIN_NAME_LENGTH,
        "La marca debe tener al menos 2 caracteres",
    )
}

/// Validar modelo: recortado y con al menos 2 caracteres
pub fn validate_model(model: &str) -> Result<(), ValidationError> {
    require_min_length(
        model,
        MIN_NAME_LENGTH,
        "El modelo debe tener al menos 2 caracteres",
    )
}

/// Validar descripción de daños: al menos 10 caracteres tras recortar
pub fn validate_damage_description(description: &str) -> Result<(), ValidationError> {
    require_min_length(
        description,
        MIN_DESCRIPTION_LENGTH,
        "La descripción debe tener al menos 10 caracteres",
    )
}
