//! In-memory Record Store.
//!
//! Vec-backed collections behind a single `RwLock`, preserving insertion
//! order (the contract for grade listings) and enforcing the unique
//! indexes. Used directly in tests and as the default store for local runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    Grade, GradePatch, Room, RoomPatch, Schedule, SchedulePatch, Student, StudentPatch, Subject,
    SubjectPatch, Teacher, TeacherPatch, User, UserRecordPatch,
};
use crate::traits::{
    GradeStore, RoomStore, ScheduleStore, StudentStore, SubjectStore, TeacherStore, UserStore,
};
use aulario_core::{GradeId, RoomId, ScheduleId, StudentId, SubjectId, TeacherId, UserId};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    students: Vec<Student>,
    teachers: Vec<Teacher>,
    subjects: Vec<Subject>,
    rooms: Vec<Room>,
    schedules: Vec<Schedule>,
    grades: Vec<Grade>,
}

/// In-memory document store holding all six collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .iter()
            .any(|u| u.identity_id == user.identity_id)
        {
            return Err(StoreError::DuplicateKey {
                collection: "users",
                key: "identity_id",
                value: user.identity_id,
            });
        }
        if inner
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::DuplicateKey {
                collection: "users",
                key: "email",
                value: user.email,
            });
        }
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_identity(&self, identity_id: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.identity_id == identity_id)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update_user(&self, id: UserId, patch: UserRecordPatch) -> StoreResult<User> {
        let mut inner = self.inner.write().await;
        if let Some(email) = &patch.email {
            if inner
                .users
                .iter()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(StoreError::DuplicateKey {
                    collection: "users",
                    key: "email",
                    value: email.clone(),
                });
            }
        }
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound {
                resource: "users",
                id: id.to_string(),
            })?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(state) = patch.state {
            user.state = state;
        }
        user.updated_at = chrono::Utc::now();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(StoreError::NotFound {
                resource: "users",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.clone())
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn insert_student(&self, student: Student) -> StoreResult<Student> {
        let mut inner = self.inner.write().await;
        if inner
            .students
            .iter()
            .any(|s| s.matricula == student.matricula)
        {
            return Err(StoreError::DuplicateKey {
                collection: "students",
                key: "matricula",
                value: student.matricula,
            });
        }
        inner.students.push(student.clone());
        Ok(student)
    }

    async fn get_student(&self, id: StudentId) -> StoreResult<Option<Student>> {
        let inner = self.inner.read().await;
        Ok(inner.students.iter().find(|s| s.id == id).cloned())
    }

    async fn find_student_by_matricula(&self, matricula: &str) -> StoreResult<Option<Student>> {
        let inner = self.inner.read().await;
        Ok(inner
            .students
            .iter()
            .find(|s| s.matricula == matricula)
            .cloned())
    }

    async fn update_student(&self, id: StudentId, patch: StudentPatch) -> StoreResult<Student> {
        let mut inner = self.inner.write().await;
        if let Some(matricula) = &patch.matricula {
            if inner
                .students
                .iter()
                .any(|s| s.id != id && &s.matricula == matricula)
            {
                return Err(StoreError::DuplicateKey {
                    collection: "students",
                    key: "matricula",
                    value: matricula.clone(),
                });
            }
        }
        let student = inner
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound {
                resource: "students",
                id: id.to_string(),
            })?;
        if let Some(matricula) = patch.matricula {
            student.matricula = matricula;
        }
        if let Some(name) = patch.name {
            student.name = name;
        }
        if let Some(email) = patch.email {
            student.email = email;
        }
        Ok(student.clone())
    }

    async fn delete_student(&self, id: StudentId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.students.len();
        inner.students.retain(|s| s.id != id);
        if inner.students.len() == before {
            return Err(StoreError::NotFound {
                resource: "students",
                id: id.to_string(),
            });
        }
        // No cascade: grades referencing this student stay put.
        Ok(())
    }

    async fn list_students(&self) -> StoreResult<Vec<Student>> {
        let inner = self.inner.read().await;
        Ok(inner.students.clone())
    }
}

#[async_trait]
impl TeacherStore for MemoryStore {
    async fn insert_teacher(&self, teacher: Teacher) -> StoreResult<Teacher> {
        let mut inner = self.inner.write().await;
        if inner
            .teachers
            .iter()
            .any(|t| t.employee_number == teacher.employee_number)
        {
            return Err(StoreError::DuplicateKey {
                collection: "teachers",
                key: "employee_number",
                value: teacher.employee_number,
            });
        }
        inner.teachers.push(teacher.clone());
        Ok(teacher)
    }

    async fn get_teacher(&self, id: TeacherId) -> StoreResult<Option<Teacher>> {
        let inner = self.inner.read().await;
        Ok(inner.teachers.iter().find(|t| t.id == id).cloned())
    }

    async fn update_teacher(&self, id: TeacherId, patch: TeacherPatch) -> StoreResult<Teacher> {
        let mut inner = self.inner.write().await;
        if let Some(number) = &patch.employee_number {
            if inner
                .teachers
                .iter()
                .any(|t| t.id != id && &t.employee_number == number)
            {
                return Err(StoreError::DuplicateKey {
                    collection: "teachers",
                    key: "employee_number",
                    value: number.clone(),
                });
            }
        }
        let teacher = inner
            .teachers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound {
                resource: "teachers",
                id: id.to_string(),
            })?;
        if let Some(number) = patch.employee_number {
            teacher.employee_number = number;
        }
        if let Some(name) = patch.name {
            teacher.name = name;
        }
        if let Some(email) = patch.email {
            teacher.email = email;
        }
        Ok(teacher.clone())
    }

    async fn delete_teacher(&self, id: TeacherId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.teachers.len();
        inner.teachers.retain(|t| t.id != id);
        if inner.teachers.len() == before {
            return Err(StoreError::NotFound {
                resource: "teachers",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_teachers(&self) -> StoreResult<Vec<Teacher>> {
        let inner = self.inner.read().await;
        Ok(inner.teachers.clone())
    }
}

#[async_trait]
impl SubjectStore for MemoryStore {
    async fn insert_subject(&self, subject: Subject) -> StoreResult<Subject> {
        let mut inner = self.inner.write().await;
        if inner.subjects.iter().any(|s| s.code == subject.code) {
            return Err(StoreError::DuplicateKey {
                collection: "subjects",
                key: "code",
                value: subject.code,
            });
        }
        inner.subjects.push(subject.clone());
        Ok(subject)
    }

    async fn get_subject(&self, id: SubjectId) -> StoreResult<Option<Subject>> {
        let inner = self.inner.read().await;
        Ok(inner.subjects.iter().find(|s| s.id == id).cloned())
    }

    async fn update_subject(&self, id: SubjectId, patch: SubjectPatch) -> StoreResult<Subject> {
        let mut inner = self.inner.write().await;
        if let Some(code) = &patch.code {
            if inner.subjects.iter().any(|s| s.id != id && &s.code == code) {
                return Err(StoreError::DuplicateKey {
                    collection: "subjects",
                    key: "code",
                    value: code.clone(),
                });
            }
        }
        let subject = inner
            .subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound {
                resource: "subjects",
                id: id.to_string(),
            })?;
        if let Some(code) = patch.code {
            subject.code = code;
        }
        if let Some(name) = patch.name {
            subject.name = name;
        }
        Ok(subject.clone())
    }

    async fn delete_subject(&self, id: SubjectId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.subjects.len();
        inner.subjects.retain(|s| s.id != id);
        if inner.subjects.len() == before {
            return Err(StoreError::NotFound {
                resource: "subjects",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_subjects(&self) -> StoreResult<Vec<Subject>> {
        let inner = self.inner.read().await;
        Ok(inner.subjects.clone())
    }
}

#[async_trait]
impl RoomStore for MemoryStore {
    async fn insert_room(&self, room: Room) -> StoreResult<Room> {
        let mut inner = self.inner.write().await;
        inner.rooms.push(room.clone());
        Ok(room)
    }

    async fn get_room(&self, id: RoomId) -> StoreResult<Option<Room>> {
        let inner = self.inner.read().await;
        Ok(inner.rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn update_room(&self, id: RoomId, patch: RoomPatch) -> StoreResult<Room> {
        let mut inner = self.inner.write().await;
        let room = inner
            .rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound {
                resource: "rooms",
                id: id.to_string(),
            })?;
        if let Some(number) = patch.number {
            room.number = number;
        }
        if let Some(building) = patch.building {
            room.building = building;
        }
        if let Some(level) = patch.level {
            room.level = level;
        }
        Ok(room.clone())
    }

    async fn delete_room(&self, id: RoomId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.rooms.len();
        inner.rooms.retain(|r| r.id != id);
        if inner.rooms.len() == before {
            return Err(StoreError::NotFound {
                resource: "rooms",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_rooms(&self) -> StoreResult<Vec<Room>> {
        let inner = self.inner.read().await;
        Ok(inner.rooms.clone())
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn insert_schedule(&self, schedule: Schedule) -> StoreResult<Schedule> {
        let mut inner = self.inner.write().await;
        inner.schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn get_schedule(&self, id: ScheduleId) -> StoreResult<Option<Schedule>> {
        let inner = self.inner.read().await;
        Ok(inner.schedules.iter().find(|s| s.id == id).cloned())
    }

    async fn update_schedule(
        &self,
        id: ScheduleId,
        patch: SchedulePatch,
    ) -> StoreResult<Schedule> {
        let mut inner = self.inner.write().await;
        let schedule = inner
            .schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound {
                resource: "schedules",
                id: id.to_string(),
            })?;
        if let Some(columns) = patch.columns {
            schedule.columns = columns;
        }
        Ok(schedule.clone())
    }

    async fn delete_schedule(&self, id: ScheduleId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.schedules.len();
        inner.schedules.retain(|s| s.id != id);
        if inner.schedules.len() == before {
            return Err(StoreError::NotFound {
                resource: "schedules",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_schedules(&self) -> StoreResult<Vec<Schedule>> {
        let inner = self.inner.read().await;
        Ok(inner.schedules.clone())
    }
}

#[async_trait]
impl GradeStore for MemoryStore {
    async fn insert_grade(&self, grade: Grade) -> StoreResult<Grade> {
        let mut inner = self.inner.write().await;
        inner.grades.push(grade.clone());
        Ok(grade)
    }

    async fn get_grade(&self, id: GradeId) -> StoreResult<Option<Grade>> {
        let inner = self.inner.read().await;
        Ok(inner.grades.iter().find(|g| g.id == id).cloned())
    }

    async fn update_grade(&self, id: GradeId, patch: GradePatch) -> StoreResult<Grade> {
        let mut inner = self.inner.write().await;
        let grade = inner
            .grades
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StoreError::NotFound {
                resource: "grades",
                id: id.to_string(),
            })?;
        if let Some(score) = patch.score {
            grade.score = score;
        }
        if let Some(subject_id) = patch.subject_id {
            grade.subject_id = subject_id;
        }
        if let Some(term) = patch.term {
            grade.term = term;
        }
        Ok(grade.clone())
    }

    async fn delete_grade(&self, id: GradeId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.grades.len();
        inner.grades.retain(|g| g.id != id);
        if inner.grades.len() == before {
            return Err(StoreError::NotFound {
                resource: "grades",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_grades(&self) -> StoreResult<Vec<Grade>> {
        let inner = self.inner.read().await;
        Ok(inner.grades.clone())
    }

    async fn list_grades_by_student(&self, student_id: StudentId) -> StoreResult<Vec<Grade>> {
        let inner = self.inner.read().await;
        Ok(inner
            .grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountState, Role};
    use chrono::Utc;

    fn user(identity: &str, email: &str) -> User {
        User {
            id: UserId::new(),
            identity_id: identity.to_string(),
            name: "Ana".to_string(),
            email: email.to_string(),
            role: Role::Student,
            state: AccountState::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn user_identity_index_is_unique() {
        let store = MemoryStore::new();
        store.insert_user(user("idn_1", "a@example.com")).await.unwrap();
        let err = store
            .insert_user(user("idn_1", "b@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateKey {
                key: "identity_id",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn user_email_index_is_unique_and_case_insensitive() {
        let store = MemoryStore::new();
        store.insert_user(user("idn_1", "a@example.com")).await.unwrap();
        let err = store
            .insert_user(user("idn_2", "A@Example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { key: "email", .. }));
    }

    #[tokio::test]
    async fn update_user_rejects_email_collision() {
        let store = MemoryStore::new();
        store.insert_user(user("idn_1", "a@example.com")).await.unwrap();
        let second = store.insert_user(user("idn_2", "b@example.com")).await.unwrap();
        let err = store
            .update_user(
                second.id,
                UserRecordPatch {
                    email: Some("a@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { key: "email", .. }));
    }

    #[tokio::test]
    async fn update_user_applies_only_present_fields() {
        let store = MemoryStore::new();
        let created = store.insert_user(user("idn_1", "a@example.com")).await.unwrap();
        let updated = store
            .update_user(
                created.id,
                UserRecordPatch {
                    role: Some(Role::Teacher),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Teacher);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.state, AccountState::Active);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn delete_missing_user_reports_not_found() {
        let store = MemoryStore::new();
        let err = store.delete_user(UserId::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn grades_survive_student_deletion_in_insertion_order() {
        let store = MemoryStore::new();
        let student = Student {
            id: StudentId::new(),
            matricula: "A001".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        };
        store.insert_student(student.clone()).await.unwrap();
        let subject_id = SubjectId::new();
        for score in [60.0, 85.0] {
            store
                .insert_grade(Grade {
                    id: GradeId::new(),
                    score,
                    student_id: student.id,
                    subject_id,
                    term: "2024-B".to_string(),
                })
                .await
                .unwrap();
        }

        store.delete_student(student.id).await.unwrap();

        let grades = store.list_grades_by_student(student.id).await.unwrap();
        assert_eq!(grades.len(), 2);
        assert_eq!(grades[0].score, 60.0);
        assert_eq!(grades[1].score, 85.0);
    }

    #[tokio::test]
    async fn subject_code_is_unique() {
        let store = MemoryStore::new();
        let subject = Subject {
            id: SubjectId::new(),
            code: "MAT101".to_string(),
            name: "Matemáticas".to_string(),
        };
        store.insert_subject(subject).await.unwrap();
        let err = store
            .insert_subject(Subject {
                id: SubjectId::new(),
                code: "MAT101".to_string(),
                name: "Otra".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { key: "code", .. }));
    }
}
