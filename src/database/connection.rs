//! Conexión al almacén de carros
//!
//! Crea el pool de PostgreSQL, ejecuta las migraciones y elige
//! la implementación de `VehicleStore` según la configuración.

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;
use crate::config::StoreBackend;
use crate::repositories::{InMemoryVehicleStore, PgVehicleStore, VehicleStore};

/// Crear el pool y aplicar las migraciones pendientes
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🔌 Conectando a PostgreSQL: {}", mask_database_url(&config.url));
    let pool = config.create_pool().await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Migraciones aplicadas");
    Ok(())
}

/// Construye el almacén configurado
pub async fn connect_store(backend: StoreBackend) -> Result<Arc<dyn VehicleStore>> {
    match backend {
        StoreBackend::Postgres => {
            let config = DatabaseConfig::from_env()?;
            let pool = create_pool(&config).await?;
            Ok(Arc::new(PgVehicleStore::new(pool)))
        }
        StoreBackend::Memory => {
            info!("🧪 Usando almacén en memoria (los datos no se conservan)");
            Ok(Arc::new(InMemoryVehicleStore::new()))
        }
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
            let host = &url[at_pos + 1..];
            format!("{}***:***@{}", protocol, host)
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}
