use promotion_service::{
    build_router,
    config::{PromotionConfig, StoreBackend},
    repository::{
        MemoryPromotionRepository, MemoryRestaurantRepository, MemoryUserRepository,
        MongoPromotionRepository, MongoRestaurantRepository, MongoUserRepository,
        PromotionRepository, RestaurantRepository, UserRepository,
    },
    services::{MongoDb, PromotionService},
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
    let config = PromotionConfig::from_env()?;

    init_tracing(&config.service_name, &config.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting promotion management service"
    );

    let (users, restaurants, promotions): (
        Arc<dyn UserRepository>,
        Arc<dyn RestaurantRepository>,
        Arc<dyn PromotionRepository>,
    ) = match config.store_backend {
        StoreBackend::Mongo => {
            let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;
            db.initialize_indexes().await?;
            tracing::info!("Database initialized successfully");
            let timeout = Duration::from_secs(config.mongodb.query_timeout_secs);
            (
                Arc::new(MongoUserRepository::new(&db, timeout)),
                Arc::new(MongoRestaurantRepository::new(&db, timeout)),
                Arc::new(MongoPromotionRepository::new(&db, timeout)),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; records do not survive restarts");
            (
                Arc::new(MemoryUserRepository::new()),
                Arc::new(MemoryRestaurantRepository::new()),
                Arc::new(MemoryPromotionRepository::new()),
            )
        }
    };

    // Verification-only codec: this service never holds the signing key.
    let codec = TokenCodec::from_public_key_file(&config.token.public_key_path)?;

    let promotion_service =
        PromotionService::new(promotions.clone(), restaurants.clone(), users.clone());

    let state = AppState {
        config: config.clone(),
        codec,
        users,
        restaurants,
        promotions,
        promotion_service,
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
