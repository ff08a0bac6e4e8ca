use crate::models::{Promotion, Restaurant, User};
use mongodb::{
    bson::doc, options::IndexOptions, Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        // Promotions are filtered by owning restaurant on every list-by-
        // restaurant call and on every ownership chain walk.
        let restaurant_index = IndexModel::builder()
            .keys(doc! { "restaurantId": 1 })
            .options(
                IndexOptions::builder()
                    .name("restaurant_lookup".to_string())
                    .build(),
            )
            .build();

        self.promotions()
            .create_index(restaurant_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create restaurantId index on promotions collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on promotions.restaurantId");

        // The authorizer resolves the acting user by token subject (email)
        // on every protected request.
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name("email_lookup".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.users().create_index(email_index, None).await.map_err(|e| {
            tracing::error!("Failed to create email index on users collection: {}", e);
            AppError::from(e)
        })?;
        tracing::info!("Created unique index on users.email");

        Ok(())
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn restaurants(&self) -> Collection<Restaurant> {
        self.db.collection("restaurants")
    }

    pub fn promotions(&self) -> Collection<Promotion> {
        self.db.collection("promotions")
    }
}
