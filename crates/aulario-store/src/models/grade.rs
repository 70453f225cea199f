//! Grade entity model.
//!
//! Grades reference a student and a subject by id. Deleting either does not
//! cascade here; readers must tolerate a reference whose target is gone.

use aulario_core::{GradeId, StudentId, SubjectId};
use serde::{Deserialize, Serialize};

/// A grade record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    /// Unique identifier of the record.
    pub id: GradeId,

    /// Numeric score. Bound checking is the service's job, not the store's.
    pub score: f64,

    /// The graded student. May be orphaned after a student deletion.
    pub student_id: StudentId,

    /// The graded subject. May be orphaned after a subject deletion.
    pub subject_id: SubjectId,

    /// Free-form period label ("2024-B", "semestre 3", ...).
    pub term: String,
}

/// Partial update of a grade record. The student reference is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradePatch {
    pub score: Option<f64>,
    pub subject_id: Option<SubjectId>,
    pub term: Option<String>,
}
