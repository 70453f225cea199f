//! Creation inputs and enriched read views.

use serde::{Deserialize, Serialize};

use aulario_core::{StudentId, SubjectId};
use aulario_store::{Grade, Student, Subject};

/// Input for creating a student.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    /// Student number, unique across students.
    pub matricula: String,
    pub name: String,
    pub email: String,
}

/// Input for creating a teacher.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTeacher {
    /// Employee number, unique across teachers.
    pub employee_number: String,
    pub name: String,
    pub email: String,
}

/// Input for creating a subject.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubject {
    /// Subject code, unique across subjects.
    pub code: String,
    pub name: String,
}

/// Input for creating a room.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoom {
    pub number: i32,
    pub building: String,
    pub level: String,
}

/// Input for creating a schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSchedule {
    /// Opaque column layout, interpreted by the presentation layer.
    pub columns: String,
}

/// Input for recording a grade.
///
/// The referenced student and subject are not checked for existence; a
/// grade may legitimately outlive either.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGrade {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub score: f64,
    /// Free-form period label ("2024-B", "semestre 3", ...).
    pub term: String,
}

/// A grade joined with whatever its references still point at.
///
/// `student` / `subject` are `None` when the referenced record has been
/// deleted; the grade itself and its classification remain valid.
#[derive(Debug, Clone, Serialize)]
pub struct GradeDetail {
    #[serde(flatten)]
    pub grade: Grade,
    pub student: Option<Student>,
    pub subject: Option<Subject>,
    /// Computed from the stored score, never persisted.
    pub approved: bool,
}
