use crate::error::StoreError;

use super::domain::{Review, ReviewFilter, ReviewId};

/// Storage boundary for reviews.
pub trait ReviewRepository: Send + Sync {
    fn insert(&self, review: Review) -> Result<(), StoreError>;
    fn fetch(&self, id: &ReviewId) -> Result<Option<Review>, StoreError>;
    /// Replaces an existing record; `false` when the id is unknown.
    fn update(&self, review: Review) -> Result<bool, StoreError>;
    fn find(&self, filter: &ReviewFilter) -> Result<Vec<Review>, StoreError>;
    fn delete(&self, id: &ReviewId) -> Result<u64, StoreError>;
}
