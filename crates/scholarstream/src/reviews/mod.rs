//! Review ledger: storage and three-dimensional filtering of user reviews.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Review, ReviewDraft, ReviewFilter, ReviewId, ReviewPatch};
pub use repository::ReviewRepository;
pub use router::review_router;
pub use service::ReviewLedger;
