#![allow(dead_code)]

use promotion_service::{
    config::{MongoConfig, PromotionConfig, StoreBackend, TokenConfig},
    models::{Promotion, Restaurant, User, UserType},
    repository::{
        MemoryPromotionRepository, MemoryRestaurantRepository, MemoryUserRepository,
        PromotionRepository, RestaurantRepository, UserRepository,
    },
    services::PromotionService,
    AppState,
};
use service_core::config::{Config, Environment};
use service_core::token::{AccessClaims, TokenCodec};
use std::sync::Arc;

const TEST_PRIVATE_PEM: &[u8] = include_bytes!("../../../dev/keys/jwt_private.pem");
const TEST_PUBLIC_PEM: &[u8] = include_bytes!("../../../dev/keys/jwt_public.pem");

pub const ISSUER: &str = "vale-food";

/// Handles onto the memory stores backing a test state, for seeding and
/// asserting directly against the store.
pub struct TestStore {
    pub users: Arc<MemoryUserRepository>,
    pub restaurants: Arc<MemoryRestaurantRepository>,
    pub promotions: Arc<MemoryPromotionRepository>,
}

pub fn test_config() -> PromotionConfig {
    PromotionConfig {
        common: Config { port: 8080 },
        environment: Environment::Dev,
        service_name: "promotion-service".to_string(),
        service_version: "test".to_string(),
        log_level: "error".to_string(),
        store_backend: StoreBackend::Memory,
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "unused".to_string(),
            query_timeout_secs: 5,
        },
        token: TokenConfig {
            issuer: ISSUER.to_string(),
            public_key_path: String::new(),
        },
    }
}

/// Signing codec, standing in for the auth service when minting test tokens.
pub fn signing_codec() -> TokenCodec {
    TokenCodec::from_key_pair(TEST_PRIVATE_PEM, TEST_PUBLIC_PEM).expect("test key pair")
}

pub fn empty_state() -> (AppState, TestStore) {
    let users = Arc::new(MemoryUserRepository::new());
    let restaurants = Arc::new(MemoryRestaurantRepository::new());
    let promotions = Arc::new(MemoryPromotionRepository::new());

    let promotions_dyn: Arc<dyn PromotionRepository> = promotions.clone();
    let restaurants_dyn: Arc<dyn RestaurantRepository> = restaurants.clone();
    let users_dyn: Arc<dyn UserRepository> = users.clone();
    let promotion_service =
        PromotionService::new(promotions_dyn, restaurants_dyn, users_dyn);

    let state = AppState {
        config: test_config(),
        // The service itself only ever verifies
        codec: TokenCodec::verify_only(TEST_PUBLIC_PEM).expect("test public key"),
        users: users.clone(),
        restaurants: restaurants.clone(),
        promotions: promotions.clone(),
        promotion_service,
    };

    (
        state,
        TestStore {
            users,
            restaurants,
            promotions,
        },
    )
}

/// Two operators with one restaurant each, a customer, and one promotion
/// owned by the first operator.
pub async fn seeded_state() -> (AppState, TestStore) {
    let (state, store) = empty_state();

    store
        .users
        .insert(User {
            id: "u-1".to_string(),
            name: "Owner One".to_string(),
            email: "owner1@example.com".to_string(),
            user_type: UserType::Restaurant,
            preferred_categories: vec![],
        })
        .await;
    store
        .users
        .insert(User {
            id: "u-2".to_string(),
            name: "Owner Two".to_string(),
            email: "owner2@example.com".to_string(),
            user_type: UserType::Restaurant,
            preferred_categories: vec![],
        })
        .await;
    store
        .users
        .insert(User {
            id: "c-1".to_string(),
            name: "Customer".to_string(),
            email: "customer@example.com".to_string(),
            user_type: UserType::Customer,
            preferred_categories: vec!["pizza".to_string()],
        })
        .await;

    store
        .restaurants
        .insert(Restaurant {
            id: "r-1".to_string(),
            user_id: "u-1".to_string(),
        })
        .await;
    store
        .restaurants
        .insert(Restaurant {
            id: "r-2".to_string(),
            user_id: "u-2".to_string(),
        })
        .await;

    store
        .promotions
        .save(Promotion {
            id: "p-1".to_string(),
            restaurant_id: "r-1".to_string(),
            title: "Two for one".to_string(),
            description: "All pizzas".to_string(),
            category: "pizza".to_string(),
            price: 9.90,
        })
        .await
        .unwrap();

    (state, store)
}

pub fn token_for(email: &str, role: &str) -> String {
    let claims = AccessClaims::new(ISSUER, email, role, 3600);
    signing_codec().sign(&claims).expect("sign test token")
}

pub fn token_with(claims: &AccessClaims) -> String {
    signing_codec().sign(claims).expect("sign test token")
}
