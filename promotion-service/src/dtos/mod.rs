use crate::models::Promotion;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRequest {
    /// Client-chosen id; a fresh one is generated when absent.
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub restaurant_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionResponse {
    pub id: String,
    pub restaurant_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
}

impl From<Promotion> for PromotionResponse {
    fn from(p: Promotion) -> Self {
        Self {
            id: p.id,
            restaurant_id: p.restaurant_id,
            title: p.title,
            description: p.description,
            category: p.category,
            price: p.price,
        }
    }
}
