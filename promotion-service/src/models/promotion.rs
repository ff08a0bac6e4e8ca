use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(rename = "_id")]
    pub id: String,
    pub restaurant_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
}
