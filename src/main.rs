use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use ride_dispatch::config::environment::EnvironmentConfig;
use ride_dispatch::database;
use ride_dispatch::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚑 Ride Dispatch - Reservas y despacho de transporte");
    info!("====================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let app_state = AppState::new(pool, config);
    let app = ride_dispatch::create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health - Health check");
    info!("🚗 Endpoints - Rides:");
    info!("   POST  /api/rides - Reservar viaje (cliente)");
    info!("   POST  /api/rides/guest - Reservar viaje sin cuenta");
    info!("   POST  /api/rides/availability - Comprobar disponibilidad");
    info!("   GET   /api/rides/:id - Consultar viaje");
    info!("🛠️ Endpoints - Admin:");
    info!("   GET   /api/admin/rides - Listar viajes");
    info!("   POST  /api/admin/rides/:id/approve - Aprobar con precio");
    info!("   POST  /api/admin/rides/:id/decline - Rechazar con motivo");
    info!("   POST  /api/admin/rides/:id/assign - Asignar conductor y vehículo");
    info!("   PATCH /api/admin/rides/:id/status - Cambiar estado");
    info!("🚙 Endpoints - Conductor:");
    info!("   GET   /api/driver/rides - Mis viajes");
    info!("   PATCH /api/driver/rides/:id/status - Avanzar estado");
    info!("   POST  /api/driver/rides/:id/complete - Completar viaje");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
