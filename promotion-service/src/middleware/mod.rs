mod auth;

pub use auth::{authorize_request, enforce_promotion_policy, AuthContext, AuthUser};
