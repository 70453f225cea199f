//! CRUD for students, teachers, subjects, rooms and schedules.
//!
//! Natural-key uniqueness (matricula, employee number, subject code) is the
//! store's unique index; a collision surfaces as a `Conflict`. Grade
//! operations live in [`crate::grades`] as a second impl block.

use std::sync::Arc;
use tracing::info;

use crate::models::{NewRoom, NewSchedule, NewStudent, NewSubject, NewTeacher};
use aulario_core::{
    AularioError, Result, RoomId, ScheduleId, StudentId, SubjectId, TeacherId,
};
use aulario_store::{
    RecordStore, Room, RoomPatch, Schedule, SchedulePatch, Student, StudentPatch, Subject,
    SubjectPatch, Teacher, TeacherPatch,
};

/// Academic entity services over the Record Store.
pub struct AcademicsService {
    pub(crate) store: Arc<dyn RecordStore>,
}

/// Reject empty or whitespace-only required fields.
fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AularioError::validation(field, "must not be empty"));
    }
    Ok(())
}

impl AcademicsService {
    /// Create a new service over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    // ── Students ─────────────────────────────────────────────────────────

    pub async fn create_student(&self, new: NewStudent) -> Result<Student> {
        require("matricula", &new.matricula)?;
        require("name", &new.name)?;
        let student = self
            .store
            .insert_student(Student {
                id: StudentId::new(),
                matricula: new.matricula,
                name: new.name,
                email: new.email,
            })
            .await?;
        info!(student_id = %student.id, matricula = %student.matricula, "Student created");
        Ok(student)
    }

    pub async fn get_student(&self, id: StudentId) -> Result<Student> {
        self.store
            .get_student(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("Student", id))
    }

    pub async fn update_student(&self, id: StudentId, patch: StudentPatch) -> Result<Student> {
        if let Some(matricula) = &patch.matricula {
            require("matricula", matricula)?;
        }
        if let Some(name) = &patch.name {
            require("name", name)?;
        }
        let student = self.store.update_student(id, patch).await?;
        info!(student_id = %id, "Student updated");
        Ok(student)
    }

    /// Delete the student record. Grades referencing it stay behind as
    /// orphaned references.
    pub async fn delete_student(&self, id: StudentId) -> Result<()> {
        self.store.delete_student(id).await?;
        info!(student_id = %id, "Student deleted");
        Ok(())
    }

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        Ok(self.store.list_students().await?)
    }

    // ── Teachers ─────────────────────────────────────────────────────────

    pub async fn create_teacher(&self, new: NewTeacher) -> Result<Teacher> {
        require("employee_number", &new.employee_number)?;
        require("name", &new.name)?;
        let teacher = self
            .store
            .insert_teacher(Teacher {
                id: TeacherId::new(),
                employee_number: new.employee_number,
                name: new.name,
                email: new.email,
            })
            .await?;
        info!(teacher_id = %teacher.id, "Teacher created");
        Ok(teacher)
    }

    pub async fn get_teacher(&self, id: TeacherId) -> Result<Teacher> {
        self.store
            .get_teacher(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("Teacher", id))
    }

    pub async fn update_teacher(&self, id: TeacherId, patch: TeacherPatch) -> Result<Teacher> {
        if let Some(employee_number) = &patch.employee_number {
            require("employee_number", employee_number)?;
        }
        if let Some(name) = &patch.name {
            require("name", name)?;
        }
        let teacher = self.store.update_teacher(id, patch).await?;
        info!(teacher_id = %id, "Teacher updated");
        Ok(teacher)
    }

    pub async fn delete_teacher(&self, id: TeacherId) -> Result<()> {
        self.store.delete_teacher(id).await?;
        info!(teacher_id = %id, "Teacher deleted");
        Ok(())
    }

    pub async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.store.list_teachers().await?)
    }

    // ── Subjects ─────────────────────────────────────────────────────────

    pub async fn create_subject(&self, new: NewSubject) -> Result<Subject> {
        require("code", &new.code)?;
        require("name", &new.name)?;
        let subject = self
            .store
            .insert_subject(Subject {
                id: SubjectId::new(),
                code: new.code,
                name: new.name,
            })
            .await?;
        info!(subject_id = %subject.id, code = %subject.code, "Subject created");
        Ok(subject)
    }

    pub async fn get_subject(&self, id: SubjectId) -> Result<Subject> {
        self.store
            .get_subject(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("Subject", id))
    }

    pub async fn update_subject(&self, id: SubjectId, patch: SubjectPatch) -> Result<Subject> {
        if let Some(code) = &patch.code {
            require("code", code)?;
        }
        if let Some(name) = &patch.name {
            require("name", name)?;
        }
        let subject = self.store.update_subject(id, patch).await?;
        info!(subject_id = %id, "Subject updated");
        Ok(subject)
    }

    /// Delete the subject record. Grades referencing it stay behind.
    pub async fn delete_subject(&self, id: SubjectId) -> Result<()> {
        self.store.delete_subject(id).await?;
        info!(subject_id = %id, "Subject deleted");
        Ok(())
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
        Ok(self.store.list_subjects().await?)
    }

    // ── Rooms ────────────────────────────────────────────────────────────

    pub async fn create_room(&self, new: NewRoom) -> Result<Room> {
        require("building", &new.building)?;
        let room = self
            .store
            .insert_room(Room {
                id: RoomId::new(),
                number: new.number,
                building: new.building,
                level: new.level,
            })
            .await?;
        info!(room_id = %room.id, "Room created");
        Ok(room)
    }

    pub async fn get_room(&self, id: RoomId) -> Result<Room> {
        self.store
            .get_room(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("Room", id))
    }

    pub async fn update_room(&self, id: RoomId, patch: RoomPatch) -> Result<Room> {
        if let Some(building) = &patch.building {
            require("building", building)?;
        }
        let room = self.store.update_room(id, patch).await?;
        info!(room_id = %id, "Room updated");
        Ok(room)
    }

    pub async fn delete_room(&self, id: RoomId) -> Result<()> {
        self.store.delete_room(id).await?;
        info!(room_id = %id, "Room deleted");
        Ok(())
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.store.list_rooms().await?)
    }

    // ── Schedules ────────────────────────────────────────────────────────

    pub async fn create_schedule(&self, new: NewSchedule) -> Result<Schedule> {
        require("columns", &new.columns)?;
        let schedule = self
            .store
            .insert_schedule(Schedule {
                id: ScheduleId::new(),
                columns: new.columns,
            })
            .await?;
        info!(schedule_id = %schedule.id, "Schedule created");
        Ok(schedule)
    }

    pub async fn get_schedule(&self, id: ScheduleId) -> Result<Schedule> {
        self.store
            .get_schedule(id)
            .await?
            .ok_or_else(|| AularioError::not_found_id("Schedule", id))
    }

    pub async fn update_schedule(&self, id: ScheduleId, patch: SchedulePatch) -> Result<Schedule> {
        if let Some(columns) = &patch.columns {
            require("columns", columns)?;
        }
        let schedule = self.store.update_schedule(id, patch).await?;
        info!(schedule_id = %id, "Schedule updated");
        Ok(schedule)
    }

    pub async fn delete_schedule(&self, id: ScheduleId) -> Result<()> {
        self.store.delete_schedule(id).await?;
        info!(schedule_id = %id, "Schedule deleted");
        Ok(())
    }

    pub async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        Ok(self.store.list_schedules().await?)
    }
}
