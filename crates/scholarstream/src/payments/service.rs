use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use chrono::Utc;

use crate::error::ApiError;
use crate::ids;

use super::domain::{Payment, PaymentDraft, PaymentId};
use super::repository::PaymentRepository;

static PAYMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_payment_id() -> PaymentId {
    PaymentId(ids::next_in_sequence(PaymentId::PREFIX, &PAYMENT_SEQUENCE))
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Records completed payments. Verification against the gateway happened
/// upstream; this ledger stamps the entry and stores it.
pub struct PaymentLedger<P> {
    payments: Arc<P>,
}

impl<P: PaymentRepository> PaymentLedger<P> {
    pub fn new(payments: Arc<P>) -> Self {
        Self { payments }
    }

    /// All four fields are required; the entry is stamped paidAt = now and
    /// status = "completed" unconditionally.
    pub fn record(&self, draft: PaymentDraft) -> Result<PaymentId, ApiError> {
        let mut missing = Vec::new();
        if !present(&draft.scholarship_id) {
            missing.push("scholarshipId");
        }
        if draft.amount.is_none() {
            missing.push("amount");
        }
        if !present(&draft.transaction_id) {
            missing.push("transactionId");
        }
        if !present(&draft.email) {
            missing.push("email");
        }
        if !missing.is_empty() {
            return Err(ApiError::MissingFields(missing));
        }

        let (Some(scholarship_id), Some(amount), Some(transaction_id), Some(email)) = (
            draft.scholarship_id,
            draft.amount,
            draft.transaction_id,
            draft.email,
        )
        else {
            return Err(ApiError::MissingFields(missing));
        };

        let id = next_payment_id();
        self.payments.insert(Payment {
            id: id.clone(),
            scholarship_id,
            amount,
            transaction_id,
            email,
            paid_at: Utc::now(),
            status: "completed".to_string(),
        })?;

        Ok(id)
    }
}
