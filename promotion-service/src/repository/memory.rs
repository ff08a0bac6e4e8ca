//! In-process store, used for local runs and tests. Mirrors the document
//! store contract exactly, including the "absent id delete is a no-op"
//! behavior.

use crate::models::{Promotion, Restaurant, User};
use async_trait::async_trait;
use service_core::store::StoreError;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl super::UserRepository for MemoryUserRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryRestaurantRepository {
    restaurants: RwLock<HashMap<String, Restaurant>>,
}

impl MemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, restaurant: Restaurant) {
        self.restaurants
            .write()
            .await
            .insert(restaurant.id.clone(), restaurant);
    }
}

#[async_trait]
impl super::RestaurantRepository for MemoryRestaurantRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Restaurant>, StoreError> {
        Ok(self.restaurants.read().await.get(id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryPromotionRepository {
    promotions: RwLock<HashMap<String, Promotion>>,
}

impl MemoryPromotionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl super::PromotionRepository for MemoryPromotionRepository {
    async fn get_all(&self) -> Result<Vec<Promotion>, StoreError> {
        Ok(self.promotions.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Promotion>, StoreError> {
        Ok(self.promotions.read().await.get(id).cloned())
    }

    async fn get_by_restaurant_id(
        &self,
        restaurant_id: &str,
    ) -> Result<Vec<Promotion>, StoreError> {
        Ok(self
            .promotions
            .read()
            .await
            .values()
            .filter(|p| p.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn save(&self, promotion: Promotion) -> Result<(), StoreError> {
        self.promotions
            .write()
            .await
            .insert(promotion.id.clone(), promotion);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.promotions.write().await.remove(id);
        Ok(())
    }
}
