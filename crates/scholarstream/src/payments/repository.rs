use crate::error::StoreError;

use super::domain::Payment;

/// Storage boundary for the ledger. Insert-only in this core; `all` feeds
/// the analytics fold.
pub trait PaymentRepository: Send + Sync {
    fn insert(&self, payment: Payment) -> Result<(), StoreError>;
    fn all(&self) -> Result<Vec<Payment>, StoreError>;
    fn count(&self) -> Result<u64, StoreError>;
}
