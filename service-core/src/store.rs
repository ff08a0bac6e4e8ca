//! Failure signal for the document store. Unavailability is always kept
//! distinct from "record absent": repositories return `Ok(None)` for a miss
//! and `Err(StoreError)` when the store cannot answer at all.

use crate::error::AppError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store error: {0}")]
    Backend(#[from] mongodb::error::Error),

    #[error("document store query timed out after {0:?}")]
    Timeout(Duration),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::StorageError(anyhow::Error::new(err))
    }
}

/// Run a driver call under a deadline. An elapsed deadline surfaces as
/// `StoreError::Timeout` rather than hanging the request.
pub async fn with_timeout<T, F>(deadline: Duration, fut: F) -> Result<T, StoreError>
where
    F: std::future::Future<Output = Result<T, mongodb::error::Error>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(res) => res.map_err(StoreError::from),
        Err(_) => Err(StoreError::Timeout(deadline)),
    }
}
