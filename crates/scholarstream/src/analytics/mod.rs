//! Derived summary counters over the other stores. Read-only.

pub mod router;
pub mod service;

pub use router::analytics_router;
pub use service::{AnalyticsAggregator, DashboardStats, HomeStats};
