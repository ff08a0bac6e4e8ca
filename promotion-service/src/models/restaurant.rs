use serde::{Deserialize, Serialize};

/// Links an operator identity to a restaurant. Ownership is immutable once
/// set; there is no transfer operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
}
