use serde::{Deserialize, Serialize};

/// Kind of principal. Wire form matches the `role` claim in access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Customer,
    Restaurant,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "CUSTOMER",
            UserType::Restaurant => "RESTAURANT",
        }
    }
}

/// User record as replicated into this service's store. No credential
/// material travels here; the auth service keeps that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Canonical (lowercase) email, unique across users.
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub preferred_categories: Vec<String>,
}
