//! service-core: shared infrastructure for the vale-food services.

pub mod config;
pub mod error;
pub mod extract;
pub mod observability;
pub mod store;
pub mod token;

pub use async_trait;
pub use axum;
pub use mongodb;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;
pub use tracing;
pub use validator;
