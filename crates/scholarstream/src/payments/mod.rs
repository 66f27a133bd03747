//! Payment ledger: append-only record of completed charges.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Payment, PaymentDraft, PaymentId};
pub use repository::PaymentRepository;
pub use router::payment_router;
pub use service::PaymentLedger;
