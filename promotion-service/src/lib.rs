pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::PromotionConfig;
use crate::repository::{PromotionRepository, RestaurantRepository, UserRepository};
use crate::services::PromotionService;
use service_core::token::TokenCodec;

#[derive(Clone)]
pub struct AppState {
    pub config: PromotionConfig,
    pub codec: TokenCodec,
    pub users: Arc<dyn UserRepository>,
    pub restaurants: Arc<dyn RestaurantRepository>,
    pub promotions: Arc<dyn PromotionRepository>,
    pub promotion_service: PromotionService,
}

pub fn build_router(state: AppState) -> Router {
    // Every promotion route sits behind the authorizer; /health does not.
    let promotion_routes = Router::new()
        .route(
            "/valefood/promotions",
            get(handlers::search_promotions).post(handlers::create_promotion),
        )
        .route(
            "/valefood/promotions/:id",
            get(handlers::search_promotion)
                .put(handlers::update_promotion)
                .delete(handlers::remove_promotion),
        )
        .route(
            "/valefood/promotions/users/:user_id",
            get(handlers::search_promotions_by_user_preferences),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::authorize_request,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(promotion_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
