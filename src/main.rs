mod cache;
mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use cache::redis_client::RedisClient;
use cache::{CacheConfig, CollectionCache};
use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚛 Control de Combustible - Transportes GM");
    info!("==========================================");

    let config = EnvironmentConfig::default();
    if config.is_development() {
        info!("🔧 Modo desarrollo");
    }

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Inicializar Redis y cache de colecciones
    let redis_config = CacheConfig {
        redis_url: config.redis_url.clone(),
        default_ttl: config.cache_ttl,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };
    let collection_cache = CollectionCache::new(redis_client);

    let cors = if config.cors_origins == vec!["*".to_string()] {
        middleware::cors::cors_middleware()
    } else {
        middleware::cors::cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config.clone(), collection_cache);

    // Rutas protegidas por sesión
    let protected = Router::new()
        .route("/api/auth/me", get(routes::auth_routes::me))
        .nest("/api/conductor", routes::driver_routes::create_conductor_router())
        .nest("/api/camion", routes::truck_routes::create_camion_router())
        .nest("/api/viaje", routes::trip_routes::create_viaje_router())
        .nest("/api/unidad", routes::unit_routes::create_unidad_router())
        .nest("/api/reporte", routes::report_routes::create_reporte_router())
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::auth_middleware,
        ));

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/contacto", routes::contact_routes::create_contacto_router())
        .merge(protected)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   POST /api/auth/logout - Cerrar sesión");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🧑 Endpoints - Conductor:");
    info!("   POST /api/conductor - Crear conductor");
    info!("   GET  /api/conductor - Listar conductores");
    info!("   GET  /api/conductor/:id - Obtener conductor");
    info!("   PUT  /api/conductor/:id - Actualizar conductor");
    info!("   DELETE /api/conductor/:id - Eliminar conductor");
    info!("   GET  /api/conductor/:id/estadisticas - Estadísticas del conductor");
    info!("🚚 Endpoints - Camión:");
    info!("   POST /api/camion - Crear camión");
    info!("   GET  /api/camion - Listar camiones");
    info!("   GET  /api/camion/:id - Obtener camión");
    info!("   PUT  /api/camion/:id - Actualizar camión");
    info!("   DELETE /api/camion/:id - Eliminar camión");
    info!("   GET  /api/camion/:id/estadisticas - Estadísticas del camión");
    info!("⛽ Endpoints - Viaje:");
    info!("   POST /api/viaje - Registrar viaje");
    info!("   GET  /api/viaje - Listar viajes (acepta filtros)");
    info!("   GET  /api/viaje/:id - Obtener viaje");
    info!("   PUT  /api/viaje/:id - Actualizar viaje");
    info!("   DELETE /api/viaje/:id - Eliminar viaje");
    info!("🚙 Endpoints - Unidad:");
    info!("   GET  /api/unidad - Listar unidades de la flota");
    info!("📊 Endpoints - Reporte:");
    info!("   GET  /api/reporte/resumen - Tarjetas del panel");
    info!("   GET  /api/reporte/consumo - Tendencia de consumo");
    info!("   GET  /api/reporte/eficiencia-rutas - Eficiencia por ruta");
    info!("   GET  /api/reporte/export - Exportar CSV");
    info!("📧 Endpoints - Contacto:");
    info!("   POST /api/contacto - Formulario de contacto");

    // Iniciar servidor
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

/// Health check con el estado del cache
async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "service": "fuel-tracking",
        "status": "ok",
        "cache_connected": state.cache.is_connected().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
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
