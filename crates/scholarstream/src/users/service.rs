use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use chrono::Utc;

use crate::error::ApiError;
use crate::ids;

use super::domain::{Role, User, UserDraft, UserId};
use super::repository::UserRepository;

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    UserId(ids::next_in_sequence(UserId::PREFIX, &USER_SEQUENCE))
}

/// Straight-line record storage over the user collection plus the two
/// guarded paths: duplicate-email registration and role assignment.
pub struct UserDirectory<U> {
    users: Arc<U>,
}

impl<U: UserRepository> UserDirectory<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Register a new user. The email is the unique natural key; a second
    /// registration under the same email is a conflict, not an upsert.
    pub fn register(&self, draft: UserDraft) -> Result<UserId, ApiError> {
        let email = draft
            .email
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::MissingFields(vec!["email"]))?
            .to_string();

        if self.users.find_by_email(&email)?.is_some() {
            return Err(ApiError::Conflict("User already exists"));
        }

        let id = next_user_id();
        self.users.insert(User {
            id: id.clone(),
            email,
            name: draft.name,
            role: draft.role,
            moderator_for: draft.moderator_for,
            created_at: Utc::now(),
        })?;

        Ok(id)
    }

    pub fn list(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.users.all()?)
    }

    /// Pass-through single-record lookup; `None` is a valid outcome the
    /// boundary serializes as `null`.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self.users.find_by_email(email)?)
    }

    /// Assign a role. Only Student and Moderator are settable through this
    /// path; Admin is not self-assignable here.
    pub fn assign_role(&self, raw_id: &str, raw_role: &str) -> Result<(), ApiError> {
        let role = Role::parse(raw_role)
            .filter(|role| role.assignable())
            .ok_or(ApiError::InvalidRole)?;
        let id = UserId::parse(raw_id).ok_or_else(|| ApiError::InvalidId(raw_id.to_string()))?;

        let mut user = self.users.fetch(&id)?.ok_or(ApiError::NotFound("User"))?;
        user.role = Some(role);
        if !self.users.update(user)? {
            return Err(ApiError::NotFound("User"));
        }

        Ok(())
    }
}
