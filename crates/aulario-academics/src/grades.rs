//! Grade operations: score bound, computed classification, orphan-tolerant
//! reads.
//!
//! Writes do not verify that the referenced student or subject exists; the
//! store accepts any ids and readers resolve whatever is still there. The
//! "approved" classification is computed from the stored score on every
//! read and never persisted.

use tracing::info;

use crate::models::{GradeDetail, NewGrade};
use crate::service::AcademicsService;
use aulario_core::{AularioError, GradeId, Result, StudentId};
use aulario_store::{Grade, GradePatch};

/// Lowest accepted score, inclusive.
pub const SCORE_MIN: f64 = 0.0;

/// Highest accepted score, inclusive.
pub const SCORE_MAX: f64 = 100.0;

/// Scores at or above this pass.
pub const PASS_THRESHOLD: f64 = 70.0;

/// Classification of a score against [`PASS_THRESHOLD`].
#[must_use]
pub fn is_approved(score: f64) -> bool {
    score >= PASS_THRESHOLD
}

/// Reject scores outside `[SCORE_MIN, SCORE_MAX]`. NaN never passes.
fn validate_score(score: f64) -> Result<()> {
    if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
        return Err(AularioError::validation(
            "score",
            format!("score must be between {SCORE_MIN} and {SCORE_MAX}, got {score}"),
        ));
    }
    Ok(())
}

impl AcademicsService {
    /// Record a grade. Only the score is validated; the referenced ids are
    /// taken as given.
    pub async fn create_grade(&self, new: NewGrade) -> Result<Grade> {
        validate_score(new.score)?;
        let grade = self
            .store
            .insert_grade(Grade {
                id: GradeId::new(),
                score: new.score,
                student_id: new.student_id,
                subject_id: new.subject_id,
                term: new.term,
            })
            .await?;
        info!(
            grade_id = %grade.id,
            student_id = %grade.student_id,
            score = grade.score,
            "Grade recorded"
        );
        Ok(grade)
    }

    /// Apply a partial update, re-validating the score when it changes.
    pub async fn update_grade(&self, id: GradeId, patch: GradePatch) -> Result<Grade> {
        if let Some(score) = patch.score {
            validate_score(score)?;
        }
        let grade = self.store.update_grade(id, patch).await?;
        info!(grade_id = %id, "Grade updated");
        Ok(grade)
    }

    pub async fn delete_grade(&self, id: GradeId) -> Result<()> {
        self.store.delete_grade(id).await?;
        info!(grade_id = %id, "Grade deleted");
        Ok(())
    }

    /// Fetch one grade with its references resolved.
    pub async fn get_grade(&self, id: GradeId) -> Result<GradeDetail> {
        let grade = self
            .store
            .get_grade(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("Grade", id))?;
        self.enrich(grade).await
    }

    /// All grades with references resolved, insertion order.
    pub async fn list_grades(&self) -> Result<Vec<GradeDetail>> {
        let grades = self.store.list_grades().await?;
        let mut details = Vec::with_capacity(grades.len());
        for grade in grades {
            details.push(self.enrich(grade).await?);
        }
        Ok(details)
    }

    /// All grades referencing the student, insertion order. The student
    /// itself may no longer exist; its grades are still returned.
    pub async fn list_grades_by_student(&self, student_id: StudentId) -> Result<Vec<GradeDetail>> {
        let grades = self.store.list_grades_by_student(student_id).await?;
        let mut details = Vec::with_capacity(grades.len());
        for grade in grades {
            details.push(self.enrich(grade).await?);
        }
        Ok(details)
    }

    /// Resolve the grade's references; a missing target becomes `None`.
    async fn enrich(&self, grade: Grade) -> Result<GradeDetail> {
        let student = self.store.get_student(grade.student_id).await?;
        let subject = self.store.get_subject(grade.subject_id).await?;
        let approved = is_approved(grade.score);
        Ok(GradeDetail {
            grade,
            student,
            subject,
            approved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewStudent, NewSubject};
    use aulario_store::MemoryStore;
    use std::sync::Arc;

    fn service() -> AcademicsService {
        AcademicsService::new(Arc::new(MemoryStore::new()))
    }

    fn grade_for(student_id: StudentId, subject_id: aulario_core::SubjectId, score: f64) -> NewGrade {
        NewGrade {
            student_id,
            subject_id,
            score,
            term: "2024-B".to_string(),
        }
    }

    #[tokio::test]
    async fn score_bound_is_inclusive() {
        let svc = service();
        let student_id = StudentId::new();
        let subject_id = aulario_core::SubjectId::new();

        for score in [0.0, 100.0, 70.0, 69.9] {
            assert!(
                svc.create_grade(grade_for(student_id, subject_id, score))
                    .await
                    .is_ok(),
                "{score}"
            );
        }
        for score in [-1.0, 101.0, f64::NAN] {
            let err = svc
                .create_grade(grade_for(student_id, subject_id, score))
                .await
                .unwrap_err();
            assert!(matches!(err, AularioError::Validation { .. }), "{score}");
        }
    }

    #[tokio::test]
    async fn approved_is_computed_at_the_threshold() {
        assert!(is_approved(70.0));
        assert!(is_approved(100.0));
        assert!(!is_approved(69.99));
        assert!(!is_approved(0.0));
    }

    #[tokio::test]
    async fn update_revalidates_only_when_score_changes() {
        let svc = service();
        let grade = svc
            .create_grade(grade_for(StudentId::new(), aulario_core::SubjectId::new(), 80.0))
            .await
            .unwrap();

        // Term-only patch skips score validation entirely.
        let updated = svc
            .update_grade(
                grade.id,
                GradePatch {
                    term: Some("2025-A".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.term, "2025-A");
        assert_eq!(updated.score, 80.0);

        let err = svc
            .update_grade(
                grade.id,
                GradePatch {
                    score: Some(120.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AularioError::Validation { .. }));
    }

    #[tokio::test]
    async fn deleting_a_student_orphans_but_keeps_grades() {
        let svc = service();
        let student = svc
            .create_student(NewStudent {
                matricula: "A001".to_string(),
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
            })
            .await
            .unwrap();
        let subject = svc
            .create_subject(NewSubject {
                code: "MAT101".to_string(),
                name: "Matemáticas I".to_string(),
            })
            .await
            .unwrap();

        svc.create_grade(grade_for(student.id, subject.id, 85.0))
            .await
            .unwrap();
        svc.create_grade(grade_for(student.id, subject.id, 60.0))
            .await
            .unwrap();

        svc.delete_student(student.id).await.unwrap();

        let details = svc.list_grades_by_student(student.id).await.unwrap();
        assert_eq!(details.len(), 2);
        // Insertion order, classification intact, reference gone.
        assert_eq!(details[0].grade.score, 85.0);
        assert!(details[0].approved);
        assert!(!details[1].approved);
        assert!(details.iter().all(|d| d.student.is_none()));
        assert!(details.iter().all(|d| d.subject.is_some()));
    }

    #[tokio::test]
    async fn get_grade_resolves_live_references() {
        let svc = service();
        let student = svc
            .create_student(NewStudent {
                matricula: "A002".to_string(),
                name: "Beto".to_string(),
                email: "beto@example.com".to_string(),
            })
            .await
            .unwrap();
        let grade = svc
            .create_grade(grade_for(student.id, aulario_core::SubjectId::new(), 92.5))
            .await
            .unwrap();

        let detail = svc.get_grade(grade.id).await.unwrap();
        assert_eq!(detail.student.as_ref().map(|s| s.name.as_str()), Some("Beto"));
        assert!(detail.subject.is_none());
        assert!(detail.approved);
    }
}
