use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::numeric;

/// Identifier wrapper for ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentId(pub String);

impl PaymentId {
    pub(crate) const PREFIX: &'static str = "pay-";

    pub fn parse(raw: &str) -> Option<Self> {
        ids::well_formed(raw, Self::PREFIX).then(|| Self(raw.to_string()))
    }
}

/// Ledger entry for a completed charge. The gateway has already verified
/// the transaction by the time this record is written; the ledger links to
/// an application only through caller-supplied identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub scholarship_id: String,
    pub amount: f64,
    pub transaction_id: String,
    pub email: String,
    pub paid_at: DateTime<Utc>,
    pub status: String,
}

/// Recording payload; all four fields are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    #[serde(default)]
    pub scholarship_id: Option<String>,
    #[serde(default, deserialize_with = "numeric::lenient_f64_opt")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
