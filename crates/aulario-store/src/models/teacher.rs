//! Teacher entity model.

use aulario_core::TeacherId;
use serde::{Deserialize, Serialize};

/// A teacher record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier of the record.
    pub id: TeacherId,

    /// Employee number. Natural key, unique across teachers.
    pub employee_number: String,

    /// Full name.
    pub name: String,

    /// Contact email.
    pub email: String,
}

/// Partial update of a teacher record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherPatch {
    pub employee_number: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}
