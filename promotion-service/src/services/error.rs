use service_core::error::AppError;
use service_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Overloaded on purpose: missing/invalid/expired/mis-issued token,
    /// unknown subject, stale role claim, or an ownership violation all
    /// surface identically.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated, but the user's type does not permit the operation.
    #[error("Invalid user type")]
    InvalidUserType,

    #[error("Promotion not found")]
    PromotionNotFound,

    #[error("Restaurant not found")]
    RestaurantNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Storage failure")]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => {
                AppError::Unauthorized(anyhow::anyhow!("Invalid credentials"))
            }
            ServiceError::InvalidUserType => {
                AppError::Forbidden(anyhow::anyhow!("Invalid user type"))
            }
            ServiceError::PromotionNotFound => {
                AppError::NotFound(anyhow::anyhow!("Promotion not found"))
            }
            ServiceError::RestaurantNotFound => {
                AppError::NotFound(anyhow::anyhow!("Restaurant not found"))
            }
            ServiceError::UserNotFound => AppError::NotFound(anyhow::anyhow!("User not found")),
            ServiceError::Storage(e) => AppError::StorageError(anyhow::Error::new(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}
