use serde::{Deserialize, Serialize};

/// Kind of principal. The name doubles as the `role` claim in issued
/// tokens, so the wire form stays SCREAMING_SNAKE_CASE.
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

/// User record as replicated into the auth service's store. The password
/// field holds the deterministic digest computed at registration, never the
/// plain secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Canonical (lowercase) email, unique across users.
    pub email: String,
    pub password: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}
