//! Student entity model.

use aulario_core::StudentId;
use serde::{Deserialize, Serialize};

/// A student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier of the record.
    pub id: StudentId,

    /// Student number. Natural key, unique across students.
    pub matricula: String,

    /// Full name.
    pub name: String,

    /// Contact email. Not an index; uniqueness is not enforced here.
    pub email: String,
}

/// Partial update of a student record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPatch {
    pub matricula: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}
