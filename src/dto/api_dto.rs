use serde::Serialize;

// Sobre genérico de todas las respuestas exitosas
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            total: None,
        }
    }

    pub fn success_with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
            total: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    // Listados: incluye el total de elementos
    pub fn list(data: Vec<T>) -> Self {
        let total = data.len();
        Self {
            success: true,
            message: None,
            data: Some(data),
            total: Some(total),
        }
    }
}
