use crate::models::{Promotion, Restaurant, User};
use crate::services::MongoDb;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::ReplaceOptions, Collection};
use service_core::store::{with_timeout, StoreError};
use std::time::Duration;

pub struct MongoUserRepository {
    users: Collection<User>,
    query_timeout: Duration,
}

impl MongoUserRepository {
    pub fn new(db: &MongoDb, query_timeout: Duration) -> Self {
        Self {
            users: db.users(),
            query_timeout,
        }
    }
}

#[async_trait]
impl super::UserRepository for MongoUserRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        with_timeout(
            self.query_timeout,
            self.users.find_one(doc! { "_id": id }, None),
        )
        .await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        with_timeout(
            self.query_timeout,
            self.users.find_one(doc! { "email": email }, None),
        )
        .await
    }
}

pub struct MongoRestaurantRepository {
    restaurants: Collection<Restaurant>,
    query_timeout: Duration,
}

impl MongoRestaurantRepository {
    pub fn new(db: &MongoDb, query_timeout: Duration) -> Self {
        Self {
            restaurants: db.restaurants(),
            query_timeout,
        }
    }
}

#[async_trait]
impl super::RestaurantRepository for MongoRestaurantRepository {
    async fn get_by_id(&self, id: &str) -> Result<Option<Restaurant>, StoreError> {
        with_timeout(
            self.query_timeout,
            self.restaurants.find_one(doc! { "_id": id }, None),
        )
        .await
    }
}

pub struct MongoPromotionRepository {
    promotions: Collection<Promotion>,
    query_timeout: Duration,
}

impl MongoPromotionRepository {
    pub fn new(db: &MongoDb, query_timeout: Duration) -> Self {
        Self {
            promotions: db.promotions(),
            query_timeout,
        }
    }
}

#[async_trait]
impl super::PromotionRepository for MongoPromotionRepository {
    async fn get_all(&self) -> Result<Vec<Promotion>, StoreError> {
        let cursor = with_timeout(self.query_timeout, self.promotions.find(None, None)).await?;
        with_timeout(self.query_timeout, cursor.try_collect()).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Promotion>, StoreError> {
        with_timeout(
            self.query_timeout,
            self.promotions.find_one(doc! { "_id": id }, None),
        )
        .await
    }

    async fn get_by_restaurant_id(
        &self,
        restaurant_id: &str,
    ) -> Result<Vec<Promotion>, StoreError> {
        let cursor = with_timeout(
            self.query_timeout,
            self.promotions
                .find(doc! { "restaurantId": restaurant_id }, None),
        )
        .await?;
        with_timeout(self.query_timeout, cursor.try_collect()).await
    }

    async fn save(&self, promotion: Promotion) -> Result<(), StoreError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        with_timeout(
            self.query_timeout,
            self.promotions
                .replace_one(doc! { "_id": &promotion.id }, &promotion, options),
        )
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        with_timeout(
            self.query_timeout,
            self.promotions.delete_one(doc! { "_id": id }, None),
        )
        .await?;
        Ok(())
    }
}
