//! Identity store contract. The store is an external collaborator: a miss
//! is `Ok(None)`, unavailability is `Err(StoreError)`.

mod memory;
mod mongo;

pub use memory::MemoryUserRepository;
pub use mongo::MongoUserRepository;

use crate::models::User;
use async_trait::async_trait;
use service_core::store::StoreError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by canonical (lowercase) email.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
