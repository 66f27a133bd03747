use crate::error::StoreError;

use super::domain::{Application, ApplicationId};

/// Storage boundary for applications. Issuer scoping matches against the
/// embedded scholarship snapshot's `posted_user_email`.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<(), StoreError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, StoreError>;
    /// Replaces an existing record; `false` when the id is unknown.
    fn update(&self, application: Application) -> Result<bool, StoreError>;
    fn find_by_applicant(&self, email: &str) -> Result<Vec<Application>, StoreError>;
    fn find_by_issuer(&self, email: &str) -> Result<Vec<Application>, StoreError>;
    fn delete(&self, id: &ApplicationId) -> Result<u64, StoreError>;
    fn all(&self) -> Result<Vec<Application>, StoreError>;
    fn count(&self) -> Result<u64, StoreError>;
}
