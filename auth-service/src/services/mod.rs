mod auth;
mod database;
mod error;

pub use auth::AuthService;
pub use database::MongoDb;
pub use error::ServiceError;
