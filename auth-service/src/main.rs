use auth_service::{
    build_router,
    config::{AuthConfig, StoreBackend},
    repository::{MemoryUserRepository, MongoUserRepository, UserRepository},
    services::{AuthService, MongoDb},
    AppState,
};
use service_core::error::AppError;
use service_core::observability::logging::init_tracing;
use service_core::token::TokenCodec;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = AuthConfig::from_env()?;

    init_tracing(&config.service_name, &config.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting authentication service"
    );

    let users: Arc<dyn UserRepository> = match config.store_backend {
        StoreBackend::Mongo => {
            let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;
            db.initialize_indexes().await?;
            tracing::info!("Database initialized successfully");
            Arc::new(MongoUserRepository::new(
                &db,
                Duration::from_secs(config.mongodb.query_timeout_secs),
            ))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory identity store; records do not survive restarts");
            Arc::new(MemoryUserRepository::new())
        }
    };

    let codec = TokenCodec::from_key_files(
        &config.token.private_key_path,
        &config.token.public_key_path,
    )?;

    let auth_service = AuthService::new(
        users,
        codec,
        config.token.issuer.clone(),
        config.token.expiry_seconds,
    );

    let state = AppState {
        config: config.clone(),
        auth_service,
    };
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
    tracing::info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

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
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
