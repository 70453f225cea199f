//! User entity model.
//!
//! The Record Store copy of an account whose credentials and primary email
//! live in the external Identity Provider. The `email` field here is a
//! synchronized copy, not authoritative.

use aulario_core::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role assigned to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Teacher => write!(f, "teacher"),
            Self::Student => write!(f, "student"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Account state mirrored from the Identity Provider's blocked flag.
///
/// Lifecycle: `active ⇄ blocked`; deletion removes the record entirely, so
/// there is no `deleted` variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    Active,
    Blocked,
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// A user account record.
///
/// Exactly one record exists per identity-provider id; email is unique
/// across all users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier of the record.
    pub id: UserId,

    /// Identity-provider id. Immutable foreign key into the provider.
    pub identity_id: String,

    /// Display name, synchronized with the provider's first name.
    pub name: String,

    /// Email address. Synchronized copy of the provider's primary email.
    pub email: String,

    /// Assigned role.
    pub role: Role,

    /// Account state.
    pub state: AccountState,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a user record. Only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UserRecordPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub state: Option<AccountState>,
}

impl UserRecordPatch {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none() && self.state.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in [Role::Admin, Role::User, Role::Teacher, Role::Student] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("principal".parse::<Role>().is_err());
    }

    #[test]
    fn role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"student\"");
        assert_eq!(
            serde_json::to_string(&AccountState::Blocked).unwrap(),
            "\"blocked\""
        );
    }

    #[test]
    fn empty_patch_detected() {
        assert!(UserRecordPatch::default().is_empty());
        let patch = UserRecordPatch {
            role: Some(Role::Teacher),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
