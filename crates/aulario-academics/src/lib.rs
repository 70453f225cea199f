//! Academic entity services.
//!
//! CRUD over the academic record collections with value-range validation on
//! grades. Grades reference students and subjects by id without write-time
//! existence checks; reads enrich each grade with its referenced records
//! when they still exist and tolerate the ones that are gone.

pub mod grades;
pub mod models;
pub mod service;

pub use grades::{is_approved, PASS_THRESHOLD, SCORE_MAX, SCORE_MIN};
pub use models::{
    GradeDetail, NewGrade, NewRoom, NewSchedule, NewStudent, NewSubject, NewTeacher,
};
pub use service::AcademicsService;
