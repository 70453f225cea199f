//! Strongly typed identifiers.
//!
//! Newtype wrappers over UUIDs for every record collection, so a
//! [`StudentId`] can never be passed where a [`SubjectId`] is expected.
//!
//! # Example
//!
//! ```
//! use aulario_core::{StudentId, SubjectId};
//!
//! fn requires_student(id: StudentId) -> String {
//!     id.to_string()
//! }
//!
//! let student = StudentId::new();
//! let _ = requires_student(student);
//! // requires_student(SubjectId::new()); // does not compile
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The underlying UUID parse error message.
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Identifier for an application user record.
    ///
    /// Distinct from the identity-provider id, which is an opaque string
    /// owned by the external provider.
    UserId
);

define_id!(
    /// Identifier for a student record.
    StudentId
);

define_id!(
    /// Identifier for a teacher record.
    TeacherId
);

define_id!(
    /// Identifier for a subject record.
    SubjectId
);

define_id!(
    /// Identifier for a room record.
    RoomId
);

define_id!(
    /// Identifier for a schedule record.
    ScheduleId
);

define_id!(
    /// Identifier for a grade record.
    GradeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
        assert_ne!(GradeId::new(), GradeId::new());
    }

    #[test]
    fn roundtrip_through_string() {
        let id = StudentId::new();
        let parsed: StudentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<SubjectId>().unwrap_err();
        assert_eq!(err.id_type, "SubjectId");
    }

    #[test]
    fn serde_is_transparent() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn from_uuid_preserves_value() {
        let uuid = uuid::Uuid::new_v4();
        let id = RoomId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }
}
