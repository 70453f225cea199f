//! The shared error taxonomy.
//!
//! Every service maps its failures into [`AularioError`] so callers never
//! need provider- or store-specific knowledge. Each variant carries a
//! human-readable message and is machine-matchable by kind.

use serde::Serialize;
use thiserror::Error;

/// Standardized error type for the aulario services.
///
/// # Variants
///
/// - `Validation` - bad format or out-of-range value, user correctable
/// - `Conflict` - duplicate email / identity / natural key
/// - `NotFound` - missing record
/// - `ExternalService` - Identity Provider or notifier call failed
/// - `PartialFailure` - the primary operation succeeded but a dependent
///   step failed; carries both sides
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AularioError {
    /// Input validation failure.
    #[error("Validation error on field '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// Description of the validation failure.
        message: String,
    },

    /// Duplicate email, identity id, or natural key.
    #[error("Conflict on {resource}: {message}")]
    Conflict {
        /// The resource kind the conflict was detected on.
        resource: String,
        /// Description of the conflicting value.
        message: String,
    },

    /// Requested record was not found.
    #[error("{resource} not found{}", id.as_ref().map(|i| format!(": {i}")).unwrap_or_default())]
    NotFound {
        /// The type of record that was not found (e.g., "User", "Grade").
        resource: String,
        /// Optional identifier of the record.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// An external collaborator call failed.
    ///
    /// `code` carries the provider's own error code when one was returned,
    /// so it survives the mapping without leaking provider exception types.
    #[error("External service error{}: {message}", code.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
    ExternalService {
        /// Provider error code passthrough, when available.
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        /// Description of the failure.
        message: String,
    },

    /// The primary operation succeeded but a dependent step failed.
    ///
    /// Used when a compensating action could not undo a partial write, so
    /// the caller must see both what succeeded and what is now dangling.
    #[error("Partial failure: {message}; secondary failure: {detail}")]
    PartialFailure {
        /// What the primary operation accomplished.
        message: String,
        /// The dependent step's failure.
        detail: String,
    },
}

impl AularioError {
    /// Shorthand for a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a conflict error.
    pub fn conflict(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a not-found error without an id.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: None,
        }
    }

    /// Shorthand for a not-found error with the offending id.
    pub fn not_found_id(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: Some(id.to_string()),
        }
    }

    /// True if this is a not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True if this is a conflict condition.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Type alias for Results using [`AularioError`].
pub type Result<T> = std::result::Result<T, AularioError>;
