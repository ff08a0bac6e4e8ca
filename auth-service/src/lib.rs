pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::AuthConfig;
use crate::services::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub config: AuthConfig,
    pub auth_service: AuthService,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/valefood/auth/login", post(handlers::login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
