//! Sync service error type.

use thiserror::Error;

use crate::models::UserField;
use aulario_core::AularioError;
use aulario_identity::IdentityError;
use aulario_store::StoreError;

/// Error type for sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A failure already expressed in the shared taxonomy.
    #[error(transparent)]
    Shared(#[from] AularioError),

    /// An update stopped mid-sequence: earlier fields went through and were
    /// persisted, the named field did not.
    #[error("Update stopped at '{failed}': {source} (applied: {})", format_fields(applied))]
    PartialUpdate {
        /// Fields pushed to the provider and applied to the store.
        applied: Vec<UserField>,
        /// The field whose external mutation failed.
        failed: UserField,
        /// The underlying failure.
        source: AularioError,
    },

    /// Provisioning left an identity behind: the store insert failed and the
    /// compensating provider delete failed too.
    #[error("Identity {identity_id} is orphaned: store insert failed ({store_error}); compensating delete failed ({compensate_error})")]
    OrphanedIdentity {
        /// The identity that now exists only on the provider side.
        identity_id: String,
        /// Why the Record Store insert failed.
        store_error: String,
        /// Why the compensating delete failed.
        compensate_error: String,
    },
}

fn format_fields(fields: &[UserField]) -> String {
    if fields.is_empty() {
        "none".to_string()
    } else {
        fields
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Type alias for Results using [`SyncError`].
pub type SyncResult<T> = std::result::Result<T, SyncError>;

impl From<IdentityError> for SyncError {
    fn from(err: IdentityError) -> Self {
        Self::Shared(err.into())
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        Self::Shared(err.into())
    }
}

impl From<SyncError> for AularioError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Shared(inner) => inner,
            SyncError::PartialUpdate {
                applied,
                failed,
                source,
            } => AularioError::PartialFailure {
                message: format!("applied fields: {}", format_fields(&applied)),
                detail: format!("field '{failed}' failed: {source}"),
            },
            SyncError::OrphanedIdentity {
                identity_id,
                store_error,
                compensate_error,
            } => AularioError::PartialFailure {
                message: format!("identity {identity_id} created but not recorded: {store_error}"),
                detail: format!("compensating delete failed: {compensate_error}"),
            },
        }
    }
}

impl SyncError {
    /// True if this is a not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Shared(inner) if inner.is_not_found())
    }

    /// True if this is a conflict condition.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Shared(inner) if inner.is_conflict())
    }

    /// True if this is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Shared(AularioError::Validation { .. }))
    }
}
