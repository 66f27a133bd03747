use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::numeric;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub(crate) const PREFIX: &'static str = "app-";

    pub fn parse(raw: &str) -> Option<Self> {
        ids::well_formed(raw, Self::PREFIX).then(|| Self(raw.to_string()))
    }
}

/// Lifecycle status. Pending is the sole initial state; any state may move
/// to any other through the status update. The load-bearing invariant is
/// the pending-only deletion guard, not a transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Processing => "processing",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(ApplicationStatus::Pending),
            "processing" => Some(ApplicationStatus::Processing),
            "completed" => Some(ApplicationStatus::Completed),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// Point-in-time copy of the listing taken at apply time, so later edits
/// to the catalog record do not retroactively change the application's
/// view. Carries the issuer email that drives the review-queue query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipSnapshot {
    pub scholarship_name: String,
    pub university_name: String,
    #[serde(default)]
    pub university_country: String,
    #[serde(default)]
    pub subject_category: String,
    #[serde(default)]
    pub scholarship_category: String,
    #[serde(deserialize_with = "numeric::lenient_f64")]
    pub application_fees: f64,
    #[serde(default)]
    pub posted_user_email: String,
}

/// Loosely-linked payment reference embedded once the applicant records a
/// charge. Associated with the ledger entry only by matching identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReference {
    pub transaction_id: String,
    #[serde(deserialize_with = "numeric::lenient_f64")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

/// A student's submission against one scholarship. `scholarship_id` is a
/// caller-supplied reference with no foreign-key enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub scholar: ScholarshipSnapshot,
    pub scholarship_id: String,
    pub applicant: String,
    pub user_name: String,
    pub applied_date: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentReference>,
}

/// Snapshot fields as they arrive at intake, before required-field checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDraft {
    #[serde(default)]
    pub scholarship_name: Option<String>,
    #[serde(default)]
    pub university_name: Option<String>,
    #[serde(default)]
    pub university_country: Option<String>,
    #[serde(default)]
    pub subject_category: Option<String>,
    #[serde(default)]
    pub scholarship_category: Option<String>,
    #[serde(default, deserialize_with = "numeric::lenient_f64_opt")]
    pub application_fees: Option<f64>,
    #[serde(default)]
    pub posted_user_email: Option<String>,
}

/// Intake payload. Validation collects every missing required field so the
/// caller sees the full list at once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    #[serde(default)]
    pub scholar: Option<SnapshotDraft>,
    #[serde(default)]
    pub scholarship_id: Option<String>,
    #[serde(default)]
    pub applicant: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub applied_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub payment: Option<PaymentReference>,
}

/// Broader-edit merge over the mutable fields; only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub payment: Option<PaymentReference>,
}
