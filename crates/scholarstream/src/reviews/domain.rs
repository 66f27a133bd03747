use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::numeric;

/// Identifier wrapper for review records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub String);

impl ReviewId {
    pub(crate) const PREFIX: &'static str = "rev-";

    pub fn parse(raw: &str) -> Option<Self> {
        ids::well_formed(raw, Self::PREFIX).then(|| Self(raw.to_string()))
    }
}

/// A user review, filterable along three independent dimensions:
/// scholarship, author (`user_email`), and moderator (`post_by_email`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub scholarship_id: String,
    #[serde(default)]
    pub university_name: String,
    #[serde(default)]
    pub scholarship_name: String,
    pub user_name: String,
    pub user_email: String,
    pub post_by_email: String,
    pub rating_point: f64,
    pub review_comment: String,
    pub review_date: DateTime<Utc>,
}

/// Create payload; ratingPoint arrives as number or numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    #[serde(default)]
    pub scholarship_id: Option<String>,
    #[serde(default)]
    pub university_name: Option<String>,
    #[serde(default)]
    pub scholarship_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub post_by_email: Option<String>,
    #[serde(default, deserialize_with = "numeric::lenient_f64_opt")]
    pub rating_point: Option<f64>,
    #[serde(default)]
    pub review_comment: Option<String>,
}

/// Optional conjunction of exact matches; an empty filter returns all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    #[serde(default)]
    pub scholarship_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub post_by_email: Option<String>,
}

/// Edit payload. Every edit refreshes `review_date` to now.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    #[serde(default)]
    pub review_comment: Option<String>,
    #[serde(default, deserialize_with = "numeric::lenient_f64_opt")]
    pub rating_point: Option<f64>,
}
