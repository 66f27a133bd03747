use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use chrono::Utc;

use crate::error::ApiError;
use crate::ids;

use super::domain::{
    CatalogQueryParams, Scholarship, ScholarshipDraft, ScholarshipFilter, ScholarshipId,
    ScholarshipPage, ScholarshipPatch, ScholarshipSort, SortKey, SortOrder,
};
use super::repository::ScholarshipRepository;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 9;
/// Display-surface cap for the recommendation strip.
pub const RECOMMENDED_LIMIT: usize = 4;
const DEFAULT_FEATURED_LIMIT: usize = 6;

static SCHOLARSHIP_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_scholarship_id() -> ScholarshipId {
    ScholarshipId(ids::next_in_sequence(
        ScholarshipId::PREFIX,
        &SCHOLARSHIP_SEQUENCE,
    ))
}

/// Coerce a raw wire value to a 1-based index, falling back to the default
/// on anything unparseable (including zero).
fn coerce_index(raw: &Option<String>, default: u64) -> u64 {
    raw.as_deref()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|&value| value >= 1)
        .unwrap_or(default)
}

fn clean(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// Filtered, sorted, paginated retrieval over listings plus the
/// ownership-scoped and display-surface queries.
pub struct ScholarshipCatalog<S> {
    listings: Arc<S>,
}

impl<S: ScholarshipRepository> ScholarshipCatalog<S> {
    pub fn new(listings: Arc<S>) -> Self {
        Self { listings }
    }

    /// Catalog query. `totalPages = ceil(total / limit)`; an unspecified
    /// sort preserves store-native order. No upper bound is enforced on
    /// `limit`.
    pub fn list(&self, params: &CatalogQueryParams) -> Result<ScholarshipPage, ApiError> {
        let page = coerce_index(&params.page, DEFAULT_PAGE);
        let limit = coerce_index(&params.limit, DEFAULT_LIMIT);
        let skip = (page - 1) * limit;

        let filter = ScholarshipFilter {
            search: clean(&params.search),
            category: clean(&params.category),
        };
        let sort = clean(&params.sort_by)
            .and_then(|raw| SortKey::parse(&raw))
            .map(|key| ScholarshipSort {
                key,
                order: match clean(&params.order).as_deref() {
                    Some("desc") => SortOrder::Descending,
                    _ => SortOrder::Ascending,
                },
            });

        let slice = self.listings.query(&filter, sort, skip, limit)?;
        Ok(ScholarshipPage {
            total_pages: slice.total.div_ceil(limit),
            data: slice.items,
            total: slice.total,
            page,
        })
    }

    pub fn list_by_owner(&self, email: &str) -> Result<Vec<Scholarship>, ApiError> {
        Ok(self.listings.find_by_owner(email)?)
    }

    pub fn list_recommended(
        &self,
        category: &str,
        exclude_raw: &str,
    ) -> Result<Vec<Scholarship>, ApiError> {
        let exclude = ScholarshipId::parse(exclude_raw)
            .ok_or_else(|| ApiError::InvalidId(exclude_raw.to_string()))?;
        Ok(self
            .listings
            .find_related(category, &exclude, RECOMMENDED_LIMIT)?)
    }

    pub fn list_featured(&self, limit: &Option<String>) -> Result<Vec<Scholarship>, ApiError> {
        let limit = coerce_index(limit, DEFAULT_FEATURED_LIMIT as u64) as usize;
        Ok(self.listings.head(limit)?)
    }

    /// Insert as supplied; absent fields default. Returns the generated id.
    pub fn create(&self, draft: ScholarshipDraft) -> Result<ScholarshipId, ApiError> {
        let id = next_scholarship_id();
        self.listings.insert(Scholarship {
            id: id.clone(),
            scholarship_name: draft.scholarship_name.unwrap_or_default(),
            university_name: draft.university_name.unwrap_or_default(),
            university_country: draft.university_country.unwrap_or_default(),
            subject_category: draft.subject_category.unwrap_or_default(),
            scholarship_category: draft.scholarship_category.unwrap_or_default(),
            application_fees: draft.application_fees.unwrap_or(0.0),
            posted_date: draft.posted_date.unwrap_or_else(Utc::now),
            posted_user_email: draft.posted_user_email.unwrap_or_default(),
        })?;
        Ok(id)
    }

    pub fn get(&self, raw_id: &str) -> Result<Scholarship, ApiError> {
        let id =
            ScholarshipId::parse(raw_id).ok_or_else(|| ApiError::InvalidId(raw_id.to_string()))?;
        self.listings
            .fetch(&id)?
            .ok_or(ApiError::NotFound("Scholarship"))
    }

    /// Partial merge. An id that matches nothing is `NotFound`; a patch
    /// that changes nothing is `NoChange`. Distinct outcomes.
    pub fn update(&self, raw_id: &str, patch: ScholarshipPatch) -> Result<(), ApiError> {
        let id =
            ScholarshipId::parse(raw_id).ok_or_else(|| ApiError::InvalidId(raw_id.to_string()))?;
        let outcome = self.listings.apply_patch(&id, &patch)?;
        if !outcome.matched {
            return Err(ApiError::NotFound("Scholarship"));
        }
        if !outcome.modified {
            return Err(ApiError::NoChange);
        }
        Ok(())
    }

    /// Existence-checked delete; returns the deleted count.
    pub fn delete(&self, raw_id: &str) -> Result<u64, ApiError> {
        let id =
            ScholarshipId::parse(raw_id).ok_or_else(|| ApiError::InvalidId(raw_id.to_string()))?;
        if self.listings.fetch(&id)?.is_none() {
            return Err(ApiError::NotFound("Scholarship"));
        }
        Ok(self.listings.delete(&id)?)
    }
}
