//! Scholarship catalog: listing storage and the query/filter/sort/
//! pagination engine.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    CatalogQueryParams, Scholarship, ScholarshipDraft, ScholarshipFilter, ScholarshipId,
    ScholarshipPage, ScholarshipPatch, ScholarshipSort, SortKey, SortOrder,
};
pub use repository::{PatchOutcome, QuerySlice, ScholarshipRepository};
pub use router::catalog_router;
pub use service::{ScholarshipCatalog, DEFAULT_LIMIT, DEFAULT_PAGE, RECOMMENDED_LIMIT};
