use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use carson::build_app;
use carson::config::EnvironmentConfig;
use carson::database::connect_store;
use carson::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 CARSON - Sistema de Gestión de Inventario de Carros");
    info!("=====================================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {} | almacén: {:?}", config.environment, config.store_backend);
    if config.is_development() {
        info!("🔓 Orígenes CORS: {}", config.cors_origins.join(", "));
    }

    // Inicializar almacén
    let store = match connect_store(config.store_backend).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Error conectando al almacén: {}", e);
            return Err(e);
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = build_app(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /                    - Bienvenida");
    info!("   GET    /api/health          - Health check");
    info!("   GET    /vehicles            - Listar carros");
    info!("   GET    /vehicles/statistics - Estadísticas de costos");
    info!("   GET    /vehicles/:id        - Obtener carro");
    info!("   POST   /vehicles            - Crear carro");
    info!("   PUT    /vehicles/:id        - Actualizar carro");
    info!("   DELETE /vehicles/:id        - Eliminar carro");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
