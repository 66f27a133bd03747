//! User directory: registration, lookups, and role assignment.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Role, User, UserDraft, UserId};
pub use repository::UserRepository;
pub use router::user_router;
pub use service::UserDirectory;
