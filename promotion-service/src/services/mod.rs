mod database;
mod error;
mod promotion;

pub use database::MongoDb;
pub use error::ServiceError;
pub use promotion::PromotionService;
