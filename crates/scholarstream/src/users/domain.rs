use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

/// Identifier wrapper for directory records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub(crate) const PREFIX: &'static str = "usr-";

    pub fn parse(raw: &str) -> Option<Self> {
        ids::well_formed(raw, Self::PREFIX).then(|| Self(raw.to_string()))
    }
}

/// The sole authorization signal. Stored verbatim on the user record;
/// a record without one never passes a role-gated check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Moderator,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Moderator => "Moderator",
            Role::Admin => "Admin",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Student" => Some(Role::Student),
            "Moderator" => Some(Role::Moderator),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles a directory caller may assign. Admin is granted out of band,
    /// never through the role-assignment endpoint.
    pub const fn assignable(self) -> bool {
        matches!(self, Role::Student | Role::Moderator)
    }
}

/// Directory record. Email is the natural key; the storage key is a
/// generated id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moderator_for: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration payload. Only the email is required; everything else is
/// stored as supplied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub moderator_for: Vec<String>,
}
