use crate::error::StoreError;

use super::domain::{
    Scholarship, ScholarshipFilter, ScholarshipId, ScholarshipPatch, ScholarshipSort,
};

/// Matching slice of the collection plus the pre-pagination match count.
#[derive(Debug, Clone)]
pub struct QuerySlice {
    pub items: Vec<Scholarship>,
    pub total: u64,
}

/// Result of a partial update, distinguishing "no such record" from
/// "record found but nothing changed".
#[derive(Debug, Clone, Copy)]
pub struct PatchOutcome {
    pub matched: bool,
    pub modified: bool,
}

/// Storage boundary for listings. Mirrors a document store's
/// find/sort/skip/limit surface; `None` sort means store-native order.
pub trait ScholarshipRepository: Send + Sync {
    fn insert(&self, listing: Scholarship) -> Result<(), StoreError>;
    fn fetch(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, StoreError>;
    fn query(
        &self,
        filter: &ScholarshipFilter,
        sort: Option<ScholarshipSort>,
        skip: u64,
        limit: u64,
    ) -> Result<QuerySlice, StoreError>;
    fn find_by_owner(&self, email: &str) -> Result<Vec<Scholarship>, StoreError>;
    /// Same-category listings excluding one id, capped at `limit`.
    fn find_related(
        &self,
        category: &str,
        exclude: &ScholarshipId,
        limit: usize,
    ) -> Result<Vec<Scholarship>, StoreError>;
    /// Unfiltered head of the collection in store-native order.
    fn head(&self, limit: usize) -> Result<Vec<Scholarship>, StoreError>;
    fn apply_patch(
        &self,
        id: &ScholarshipId,
        patch: &ScholarshipPatch,
    ) -> Result<PatchOutcome, StoreError>;
    fn delete(&self, id: &ScholarshipId) -> Result<u64, StoreError>;
    fn count(&self) -> Result<u64, StoreError>;
}
