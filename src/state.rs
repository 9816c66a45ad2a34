//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Solo contiene el almacén y la configuración;
//! ningún dato de una solicitud sobrevive a la siguiente.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::vehicle_controller::VehicleController;
use crate::repositories::VehicleStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VehicleStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn VehicleStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }

    /// Controlador por solicitud sobre el almacén compartido
    pub fn vehicle_controller(&self) -> VehicleController {
        VehicleController::new(self.store.clone())
    }
}
