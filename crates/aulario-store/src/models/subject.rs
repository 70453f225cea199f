//! Subject entity model.

use aulario_core::SubjectId;
use serde::{Deserialize, Serialize};

/// A subject record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier of the record.
    pub id: SubjectId,

    /// Subject code. Natural key, unique across subjects.
    pub code: String,

    /// Display name.
    pub name: String,
}

/// Partial update of a subject record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectPatch {
    pub code: Option<String>,
    pub name: Option<String>,
}
