//! Operation inputs and outcomes for the sync service.

use serde::{Deserialize, Serialize};
use std::fmt;

use aulario_core::UserId;
use aulario_store::{AccountState, Role};

/// A user field touched by an update, for success/failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserField {
    Name,
    Email,
    Password,
    Role,
    State,
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Email => write!(f, "email"),
            Self::Password => write!(f, "password"),
            Self::Role => write!(f, "role"),
            Self::State => write!(f, "state"),
        }
    }
}

/// Partial update request for a user. Only present fields are touched.
///
/// `password` is pushed to the provider and never stored locally.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub state: Option<AccountState>,
}

impl UserPatch {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.state.is_none()
    }
}

/// Result of a successful provisioning.
///
/// `warning` is set when the primary operation succeeded but the welcome
/// notification did not; callers must treat that as success-with-warning,
/// not failure.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedUser {
    /// Record Store id of the new user.
    pub id: UserId,
    /// Provider identity id of the new user.
    pub identity_id: String,
    /// Secondary-step failure detail, when the welcome mail did not go out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Result of a successful (possibly empty) update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    /// Fields applied, in the order they were processed.
    pub updated_fields: Vec<UserField>,
}

/// What a webhook event ended up doing.
///
/// Replayed events land on the idempotent variants (`AlreadyExists`,
/// `NoChanges`, `AlreadyAbsent`) and are successes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "fields")]
pub enum WebhookOutcome {
    /// `user.created`: a record was inserted.
    Created,
    /// `user.created` replay: the record was already there.
    AlreadyExists,
    /// `user.updated`: the listed fields changed.
    Updated(Vec<UserField>),
    /// `user.updated` replay or no-op: nothing differed.
    NoChanges,
    /// `user.deleted`: the record was removed.
    Deleted,
    /// `user.deleted` replay: the record was already gone.
    AlreadyAbsent,
    /// An event type this service does not process.
    Unhandled,
}
