//! Application workflow: intake, the four-state lifecycle, feedback, and
//! the guarded/unconditional deletion paths.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationDraft, ApplicationId, ApplicationPatch, ApplicationStatus,
    PaymentReference, ScholarshipSnapshot, SnapshotDraft,
};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::ApplicationWorkflow;
