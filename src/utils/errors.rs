//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del sistema
//! y su conversión al sobre JSON `{success, message, error}` de la API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Mensaje común cuando falta alguno de los campos obligatorios
pub const MISSING_FIELDS_MESSAGE: &str = "Todos los campos son requeridos";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Código HTTP asociado a cada variante
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensaje legible para el cliente y detalle opcional
    fn envelope_parts(&self) -> (String, Option<String>) {
        match self {
            AppError::Database(e) => (
                "Error al acceder a la base de datos".to_string(),
                Some(e.to_string()),
            ),
            AppError::Validation(errors) => validation_parts(errors),
            AppError::NotFound(msg) | AppError::Conflict(msg) | AppError::BadRequest(msg) => {
                (msg.clone(), None)
            }
        }
    }
}

/// Los campos se ordenan para que el mensaje sea estable entre llamadas
fn validation_parts(errors: &ValidationErrors) -> (String, Option<String>) {
    let field_errors = errors.field_errors();
    let mut fields: Vec<&'static str> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    let message = fields
        .iter()
        .filter_map(|field| field_errors.get(field))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Los datos proporcionados no son válidos".to_string());

    let detail = format!("Campos inválidos: {}", fields.join(", "));
    (message, Some(detail))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, detail) = self.envelope_parts();

        match &self {
            AppError::Database(e) => tracing::error!("❌ Error de base de datos: {}", e),
            AppError::Conflict(msg) => tracing::warn!("⚠️ Conflicto: {}", msg),
            other => tracing::debug!("Solicitud rechazada: {}", other),
        }

        let body = match detail {
            Some(detail) => json!({ "success": false, "message": message, "error": detail }),
            None => json!({ "success": false, "message": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación de un solo campo
pub fn validation_error(field: &'static str, error: ValidationError) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Error agregado cuando faltan campos obligatorios en la creación
pub fn missing_fields_error(fields: &[&'static str]) -> AppError {
    let mut errors = ValidationErrors::new();
    for &field in fields {
        let mut error = ValidationError::new("required");
        error.message = Some(MISSING_FIELDS_MESSAGE.into());
        errors.add(field, error);
    }
    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error() -> AppError {
    AppError::NotFound("Carro no encontrado".to_string())
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(message: &str) -> AppError {
    AppError::Conflict(message.to_string())
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
