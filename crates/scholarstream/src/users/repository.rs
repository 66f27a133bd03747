use crate::error::StoreError;

use super::domain::{User, UserId};

/// Storage boundary for directory records.
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: User) -> Result<(), StoreError>;
    /// Replaces an existing record; `false` when the id is unknown.
    fn update(&self, user: User) -> Result<bool, StoreError>;
    fn fetch(&self, id: &UserId) -> Result<Option<User>, StoreError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    fn all(&self) -> Result<Vec<User>, StoreError>;
    fn count(&self) -> Result<u64, StoreError>;
}
