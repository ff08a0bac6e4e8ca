//! Store contracts for the three record kinds the service reads or writes.
//! A miss is `Ok(None)`; store unavailability is `Err(StoreError)` and is
//! never folded into "not found".

mod memory;
mod mongo;

pub use memory::{MemoryPromotionRepository, MemoryRestaurantRepository, MemoryUserRepository};
pub use mongo::{MongoPromotionRepository, MongoRestaurantRepository, MongoUserRepository};

use crate::models::{Promotion, Restaurant, User};
use async_trait::async_trait;
use service_core::store::StoreError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by canonical (lowercase) email.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<Option<Restaurant>, StoreError>;
}

#[async_trait]
pub trait PromotionRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Promotion>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<Promotion>, StoreError>;

    async fn get_by_restaurant_id(&self, restaurant_id: &str)
        -> Result<Vec<Promotion>, StoreError>;

    /// Insert or replace by id.
    async fn save(&self, promotion: Promotion) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
