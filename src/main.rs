use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use unipool_backend::config::{EnvironmentConfig, StorageBackend};
use unipool_backend::database::DatabaseConnection;
use unipool_backend::repositories::Repositories;
use unipool_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging (RUST_LOG, por defecto info)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 UniPool - Campus ride-sharing backend");
    info!("========================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);

    let repositories = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_connection = match DatabaseConnection::new_default().await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            db_connection.run_migrations().await?;
            info!("✅ PostgreSQL listo");
            Repositories::postgres(db_connection.pool().clone())
        }
        StorageBackend::Memory => {
            warn!("⚠️ Almacenamiento en memoria: los datos se pierden al reiniciar");
            Repositories::in_memory()
        }
    };

    if config.gemini_api_key.is_none() {
        warn!("⚠️ GEMINI_API_KEY no configurada, /api/chatbot responderá 500");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(config, repositories)?;
    let app = create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("🔑 Auth: POST /api/signup, POST /api/login, POST /api/token/refresh, GET /api/me");
    info!("🚗 Rides: /api/rides, /api/my-rides, /api/my-bookings, /api/rides/:id/book, /api/bookings/:id/cancel");
    info!("🚙 Vehicles: /api/vehicles, /api/vehicles/:id/obd");
    info!("📅 Rentals: /api/vehicle-availability, /api/my-vehicle-availability, /api/vehicle-booking, /api/my-vehicle-bookings");
    info!("🤖 Chatbot: POST /api/chatbot?query=...");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
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
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
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
