use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::numeric;

/// Identifier wrapper for published listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScholarshipId(pub String);

impl ScholarshipId {
    pub(crate) const PREFIX: &'static str = "sch-";

    pub fn parse(raw: &str) -> Option<Self> {
        ids::well_formed(raw, Self::PREFIX).then(|| Self(raw.to_string()))
    }
}

/// A published scholarship opportunity. `posted_user_email` is the issuing
/// owner and gates the moderator-scoped listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    pub id: ScholarshipId,
    pub scholarship_name: String,
    pub university_name: String,
    pub university_country: String,
    pub subject_category: String,
    pub scholarship_category: String,
    #[serde(deserialize_with = "numeric::lenient_f64")]
    pub application_fees: f64,
    pub posted_date: DateTime<Utc>,
    pub posted_user_email: String,
}

/// Create payload. Stored as supplied; absent fields default rather than
/// fail (the source performs no required-field validation here).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipDraft {
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
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub posted_user_email: Option<String>,
}

/// Partial update; only supplied fields are merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipPatch {
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

impl ScholarshipPatch {
    pub fn is_empty(&self) -> bool {
        self.scholarship_name.is_none()
            && self.university_name.is_none()
            && self.university_country.is_none()
            && self.subject_category.is_none()
            && self.scholarship_category.is_none()
            && self.application_fees.is_none()
            && self.posted_user_email.is_none()
    }
}

/// Conjunction of the two filter dimensions: free-text over
/// name/university/country and exact subject-category match.
#[derive(Debug, Clone, Default)]
pub struct ScholarshipFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Fees,
    PostedDate,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "fees" => Some(SortKey::Fees),
            "postedDate" => Some(SortKey::PostedDate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy)]
pub struct ScholarshipSort {
    pub key: SortKey,
    pub order: SortOrder,
}

/// One page of catalog results plus the totals the paging UI needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipPage {
    pub data: Vec<Scholarship>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Raw catalog query parameters as they arrive on the wire. Page and limit
/// are coerced to integers by the service, falling back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQueryParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}
