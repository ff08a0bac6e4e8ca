use crate::models::User;
use crate::services::MongoDb;
use async_trait::async_trait;
use mongodb::{bson::doc, Collection};
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
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        with_timeout(
            self.query_timeout,
            self.users.find_one(doc! { "email": email }, None),
        )
        .await
    }
}
