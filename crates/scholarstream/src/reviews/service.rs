use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use chrono::Utc;

use crate::error::ApiError;
use crate::ids;

use super::domain::{Review, ReviewDraft, ReviewFilter, ReviewId, ReviewPatch};
use super::repository::ReviewRepository;

static REVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_review_id() -> ReviewId {
    ReviewId(ids::next_in_sequence(ReviewId::PREFIX, &REVIEW_SEQUENCE))
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Stores and filters user reviews.
pub struct ReviewLedger<R> {
    reviews: Arc<R>,
}

impl<R: ReviewRepository> ReviewLedger<R> {
    pub fn new(reviews: Arc<R>) -> Self {
        Self { reviews }
    }

    pub fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>, ApiError> {
        Ok(self.reviews.find(filter)?)
    }

    pub fn create(&self, draft: ReviewDraft) -> Result<ReviewId, ApiError> {
        let mut missing = Vec::new();
        if !present(&draft.scholarship_id) {
            missing.push("scholarshipId");
        }
        if !present(&draft.user_name) {
            missing.push("userName");
        }
        if !present(&draft.user_email) {
            missing.push("userEmail");
        }
        if draft.rating_point.is_none() {
            missing.push("ratingPoint");
        }
        if !present(&draft.review_comment) {
            missing.push("reviewComment");
        }
        if !present(&draft.post_by_email) {
            missing.push("postByEmail");
        }
        if !missing.is_empty() {
            return Err(ApiError::MissingFields(missing));
        }

        let (
            Some(scholarship_id),
            Some(user_name),
            Some(user_email),
            Some(rating_point),
            Some(review_comment),
            Some(post_by_email),
        ) = (
            draft.scholarship_id,
            draft.user_name,
            draft.user_email,
            draft.rating_point,
            draft.review_comment,
            draft.post_by_email,
        )
        else {
            return Err(ApiError::MissingFields(missing));
        };

        let id = next_review_id();
        self.reviews.insert(Review {
            id: id.clone(),
            scholarship_id,
            university_name: draft.university_name.unwrap_or_default(),
            scholarship_name: draft.scholarship_name.unwrap_or_default(),
            user_name,
            user_email,
            post_by_email,
            rating_point,
            review_comment,
            review_date: Utc::now(),
        })?;

        Ok(id)
    }

    /// Edit comment and/or rating. `review_date` becomes the edit
    /// timestamp, not the original post time.
    pub fn update(&self, raw_id: &str, patch: ReviewPatch) -> Result<(), ApiError> {
        let id = ReviewId::parse(raw_id).ok_or_else(|| ApiError::InvalidId(raw_id.to_string()))?;
        let mut review = self.reviews.fetch(&id)?.ok_or(ApiError::NotFound("Review"))?;

        if let Some(comment) = patch.review_comment {
            review.review_comment = comment;
        }
        if let Some(rating) = patch.rating_point {
            review.rating_point = rating;
        }
        review.review_date = Utc::now();

        if !self.reviews.update(review)? {
            return Err(ApiError::NotFound("Review"));
        }
        Ok(())
    }

    pub fn delete(&self, raw_id: &str) -> Result<u64, ApiError> {
        let id = ReviewId::parse(raw_id).ok_or_else(|| ApiError::InvalidId(raw_id.to_string()))?;
        let deleted = self.reviews.delete(&id)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("Review"));
        }
        Ok(deleted)
    }
}
