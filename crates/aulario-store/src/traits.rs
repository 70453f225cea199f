//! Record Store capability traits.
//!
//! One trait per collection, combined into [`RecordStore`] for callers that
//! need the whole store. Services take `Arc<dyn RecordStore>` (or a narrower
//! capability) at construction time; no store handle is ambient.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{
    Grade, GradePatch, Room, RoomPatch, Schedule, SchedulePatch, Student, StudentPatch, Subject,
    SubjectPatch, Teacher, TeacherPatch, User, UserRecordPatch,
};
use aulario_core::{GradeId, RoomId, ScheduleId, StudentId, SubjectId, TeacherId, UserId};

/// User collection operations.
///
/// Uniqueness contract: `identity_id` and `email` are unique indexes; an
/// insert or email update violating either fails with `DuplicateKey`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a fully-formed user record.
    async fn insert_user(&self, user: User) -> StoreResult<User>;

    /// Fetch a user by record id.
    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Fetch a user by external identity id (unique index).
    async fn find_user_by_identity(&self, identity_id: &str) -> StoreResult<Option<User>>;

    /// Fetch a user by email (unique index).
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Apply a partial update; bumps `updated_at`. Fails with `NotFound`
    /// when the id is gone.
    async fn update_user(&self, id: UserId, patch: UserRecordPatch) -> StoreResult<User>;

    /// Delete a user by record id.
    async fn delete_user(&self, id: UserId) -> StoreResult<()>;

    /// All users, insertion order.
    async fn list_users(&self) -> StoreResult<Vec<User>>;
}

/// Student collection operations. `matricula` is a unique natural key.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn insert_student(&self, student: Student) -> StoreResult<Student>;
    async fn get_student(&self, id: StudentId) -> StoreResult<Option<Student>>;
    async fn find_student_by_matricula(&self, matricula: &str) -> StoreResult<Option<Student>>;
    async fn update_student(&self, id: StudentId, patch: StudentPatch) -> StoreResult<Student>;
    async fn delete_student(&self, id: StudentId) -> StoreResult<()>;
    async fn list_students(&self) -> StoreResult<Vec<Student>>;
}

/// Teacher collection operations. `employee_number` is a unique natural key.
#[async_trait]
pub trait TeacherStore: Send + Sync {
    async fn insert_teacher(&self, teacher: Teacher) -> StoreResult<Teacher>;
    async fn get_teacher(&self, id: TeacherId) -> StoreResult<Option<Teacher>>;
    async fn update_teacher(&self, id: TeacherId, patch: TeacherPatch) -> StoreResult<Teacher>;
    async fn delete_teacher(&self, id: TeacherId) -> StoreResult<()>;
    async fn list_teachers(&self) -> StoreResult<Vec<Teacher>>;
}

/// Subject collection operations. `code` is a unique natural key.
#[async_trait]
pub trait SubjectStore: Send + Sync {
    async fn insert_subject(&self, subject: Subject) -> StoreResult<Subject>;
    async fn get_subject(&self, id: SubjectId) -> StoreResult<Option<Subject>>;
    async fn update_subject(&self, id: SubjectId, patch: SubjectPatch) -> StoreResult<Subject>;
    async fn delete_subject(&self, id: SubjectId) -> StoreResult<()>;
    async fn list_subjects(&self) -> StoreResult<Vec<Subject>>;
}

/// Room collection operations.
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn insert_room(&self, room: Room) -> StoreResult<Room>;
    async fn get_room(&self, id: RoomId) -> StoreResult<Option<Room>>;
    async fn update_room(&self, id: RoomId, patch: RoomPatch) -> StoreResult<Room>;
    async fn delete_room(&self, id: RoomId) -> StoreResult<()>;
    async fn list_rooms(&self) -> StoreResult<Vec<Room>>;
}

/// Schedule collection operations.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn insert_schedule(&self, schedule: Schedule) -> StoreResult<Schedule>;
    async fn get_schedule(&self, id: ScheduleId) -> StoreResult<Option<Schedule>>;
    async fn update_schedule(&self, id: ScheduleId, patch: SchedulePatch)
        -> StoreResult<Schedule>;
    async fn delete_schedule(&self, id: ScheduleId) -> StoreResult<()>;
    async fn list_schedules(&self) -> StoreResult<Vec<Schedule>>;
}

/// Grade collection operations.
///
/// No referential checks happen here; the store accepts any student/subject
/// ids and keeps grades whose targets have been deleted.
#[async_trait]
pub trait GradeStore: Send + Sync {
    async fn insert_grade(&self, grade: Grade) -> StoreResult<Grade>;
    async fn get_grade(&self, id: GradeId) -> StoreResult<Option<Grade>>;
    async fn update_grade(&self, id: GradeId, patch: GradePatch) -> StoreResult<Grade>;
    async fn delete_grade(&self, id: GradeId) -> StoreResult<()>;
    async fn list_grades(&self) -> StoreResult<Vec<Grade>>;

    /// All grades referencing the student, in insertion order.
    async fn list_grades_by_student(&self, student_id: StudentId) -> StoreResult<Vec<Grade>>;
}

/// The full Record Store: every collection capability combined.
pub trait RecordStore:
    UserStore + StudentStore + TeacherStore + SubjectStore + RoomStore + ScheduleStore + GradeStore
{
}

impl<T> RecordStore for T where
    T: UserStore
        + StudentStore
        + TeacherStore
        + SubjectStore
        + RoomStore
        + ScheduleStore
        + GradeStore
{
}
