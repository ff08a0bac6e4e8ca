use crate::{
    dtos::{AuthResponse, LoginRequest},
    repository::UserRepository,
    services::ServiceError,
    utils::{digest_password, digests_match},
};
use service_core::token::{AccessClaims, TokenCodec};
use std::sync::Arc;

/// Verifies presented credentials and issues signed access tokens. Fully
/// stateless: no session record survives a successful login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    codec: TokenCodec,
    issuer: String,
    expiry_seconds: i64,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codec: TokenCodec,
        issuer: String,
        expiry_seconds: i64,
    ) -> Self {
        Self {
            users,
            codec,
            issuer,
            expiry_seconds,
        }
    }

    pub async fn authenticate(&self, req: LoginRequest) -> Result<AuthResponse, ServiceError> {
        let email = req.email.to_lowercase();

        let user = match self.users.get_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Same error as a wrong secret; a caller must not be able to
                // tell which emails are registered.
                tracing::info!("Invalid credentials (user not found)");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        let presented = digest_password(&req.password);
        if !digests_match(&presented, &user.password) {
            tracing::info!("Invalid credentials (password mismatch)");
            return Err(ServiceError::InvalidCredentials);
        }

        let claims = AccessClaims::new(
            &self.issuer,
            &user.email,
            user.user_type.as_str(),
            self.expiry_seconds,
        );
        let token = self
            .codec
            .sign(&claims)
            .map_err(|e| ServiceError::Internal(anyhow::Error::new(e)))?;

        tracing::info!(subject = %user.email, role = %user.user_type.as_str(), "Access token issued");
        Ok(AuthResponse { token })
    }
}
