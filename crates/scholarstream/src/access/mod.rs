//! Capability checks resolved from the caller's directory record.
//!
//! Authentication happens upstream; the verified caller identity reaches
//! this service as the `x-user-email` header. The policy decides, per
//! request, whether that identity may perform the attempted operation.

use std::convert::Infallible;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::users::{Role, UserRepository};

/// Header carrying the upstream-verified caller identity.
pub const IDENTITY_HEADER: &str = "x-user-email";

/// Access level required to perform an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    Authenticated,
    ModeratorOrAdmin,
    AdminOnly,
}

/// The caller identity as presented on the request, possibly absent.
#[derive(Debug, Clone, Default)]
pub struct CallerIdentity(Option<String>);

impl CallerIdentity {
    pub fn authenticated(email: impl Into<String>) -> Self {
        Self(Some(email.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CallerIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let email = parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from);

        Ok(Self(email))
    }
}

/// Read-only allow/deny decision over the caller's directory record.
pub struct AccessPolicy<U> {
    users: Arc<U>,
}

impl<U: UserRepository> AccessPolicy<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Rule table:
    /// - `Public` always passes.
    /// - `Authenticated` passes iff an identity is present; no role lookup.
    /// - `ModeratorOrAdmin` / `AdminOnly` resolve the caller's record; an
    ///   absent record or missing role denies with `Forbidden`.
    pub fn authorize(
        &self,
        caller: &CallerIdentity,
        capability: Capability,
    ) -> Result<(), ApiError> {
        if capability == Capability::Public {
            return Ok(());
        }

        let Some(email) = caller.email() else {
            return Err(ApiError::Unauthenticated);
        };

        if capability == Capability::Authenticated {
            return Ok(());
        }

        let user = self
            .users
            .find_by_email(email)?
            .ok_or(ApiError::Forbidden)?;
        let Some(role) = user.role else {
            return Err(ApiError::Forbidden);
        };

        let allowed = match capability {
            Capability::ModeratorOrAdmin => matches!(role, Role::Moderator | Role::Admin),
            Capability::AdminOnly => role == Role::Admin,
            Capability::Public | Capability::Authenticated => true,
        };

        if allowed {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}
