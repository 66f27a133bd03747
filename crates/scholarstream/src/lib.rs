//! ScholarStream: the scholarship marketplace domain library.
//!
//! Students discover and apply to scholarships, moderators and admins
//! manage listings and review applications, and successful applicants
//! record a payment. Each component exposes its storage boundary as a
//! `Send + Sync` repository trait so the HTTP service can plug in the
//! process-wide store while tests run against in-memory fakes.

pub mod access;
pub mod analytics;
pub mod applications;
pub mod catalog;
pub mod config;
pub mod error;
mod ids;
mod numeric;
pub mod payments;
pub mod reviews;
pub mod telemetry;
pub mod users;
