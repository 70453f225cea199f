//! Store error type.

use aulario_core::AularioError;
use thiserror::Error;

/// Error type for Record Store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No record with the given id (or key) exists.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// The collection the lookup ran against.
        resource: &'static str,
        /// The id or key that missed.
        id: String,
    },

    /// A unique index rejected the write.
    #[error("Duplicate {key} in {collection}: {value}")]
    DuplicateKey {
        /// The collection the write targeted.
        collection: &'static str,
        /// The unique key that collided (e.g. "email").
        key: &'static str,
        /// The colliding value.
        value: String,
    },
}

/// Type alias for Results using [`StoreError`].
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for AularioError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { resource, id } => AularioError::NotFound {
                resource: resource.to_string(),
                id: Some(id),
            },
            StoreError::DuplicateKey {
                collection,
                key,
                value,
            } => AularioError::Conflict {
                resource: collection.to_string(),
                message: format!("duplicate {key}: {value}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_not_found_into_taxonomy() {
        let err: AularioError = StoreError::NotFound {
            resource: "users",
            id: "abc".into(),
        }
        .into();
        assert!(err.is_not_found());
    }

    #[test]
    fn maps_duplicate_key_into_conflict() {
        let err: AularioError = StoreError::DuplicateKey {
            collection: "users",
            key: "email",
            value: "ana@example.com".into(),
        }
        .into();
        assert!(err.is_conflict());
        assert!(err.to_string().contains("ana@example.com"));
    }
}
