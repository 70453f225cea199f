//! Academic entity endpoints.
//!
//! One sub-router per collection, all the same shape:
//! `GET /` list, `POST /` create, `GET /:id`, `PUT /:id`, `DELETE /:id`.
//! Grades additionally expose `GET /by-student/:student_id`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::ApiError;
use crate::state::AppState;
use aulario_academics::{GradeDetail, NewGrade, NewRoom, NewSchedule, NewStudent, NewSubject, NewTeacher};
use aulario_core::{GradeId, RoomId, ScheduleId, StudentId, SubjectId, TeacherId};
use aulario_store::{
    Grade, GradePatch, Room, RoomPatch, Schedule, SchedulePatch, Student, StudentPatch, Subject,
    SubjectPatch, Teacher, TeacherPatch,
};

pub fn students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}

pub fn teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teachers).post(create_teacher))
        .route(
            "/:id",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
}

pub fn subjects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subjects).post(create_subject))
        .route(
            "/:id",
            get(get_subject).put(update_subject).delete(delete_subject),
        )
}

pub fn rooms_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/:id", get(get_room).put(update_room).delete(delete_room))
}

pub fn schedules_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_schedules).post(create_schedule))
        .route(
            "/:id",
            get(get_schedule)
                .put(update_schedule)
                .delete(delete_schedule),
        )
}

pub fn grades_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_grades).post(create_grade))
        .route("/by-student/:student_id", get(list_grades_by_student))
        .route(
            "/:id",
            get(get_grade).put(update_grade).delete(delete_grade),
        )
}

// ── Students ──────────────────────────────────────────────────────────────

async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(state.academics.list_students().await?))
}

async fn create_student(
    State(state): State<AppState>,
    Json(new): Json<NewStudent>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.academics.create_student(new).await?),
    ))
}

async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.academics.get_student(id).await?))
}

async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    Json(patch): Json<StudentPatch>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(state.academics.update_student(id, patch).await?))
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<StatusCode, ApiError> {
    state.academics.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Teachers ──────────────────────────────────────────────────────────────

async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, ApiError> {
    Ok(Json(state.academics.list_teachers().await?))
}

async fn create_teacher(
    State(state): State<AppState>,
    Json(new): Json<NewTeacher>,
) -> Result<(StatusCode, Json<Teacher>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.academics.create_teacher(new).await?),
    ))
}

async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
) -> Result<Json<Teacher>, ApiError> {
    Ok(Json(state.academics.get_teacher(id).await?))
}

async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
    Json(patch): Json<TeacherPatch>,
) -> Result<Json<Teacher>, ApiError> {
    Ok(Json(state.academics.update_teacher(id, patch).await?))
}

async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<TeacherId>,
) -> Result<StatusCode, ApiError> {
    state.academics.delete_teacher(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Subjects ──────────────────────────────────────────────────────────────

async fn list_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, ApiError> {
    Ok(Json(state.academics.list_subjects().await?))
}

async fn create_subject(
    State(state): State<AppState>,
    Json(new): Json<NewSubject>,
) -> Result<(StatusCode, Json<Subject>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.academics.create_subject(new).await?),
    ))
}

async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<SubjectId>,
) -> Result<Json<Subject>, ApiError> {
    Ok(Json(state.academics.get_subject(id).await?))
}

async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<SubjectId>,
    Json(patch): Json<SubjectPatch>,
) -> Result<Json<Subject>, ApiError> {
    Ok(Json(state.academics.update_subject(id, patch).await?))
}

async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<SubjectId>,
) -> Result<StatusCode, ApiError> {
    state.academics.delete_subject(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Rooms ─────────────────────────────────────────────────────────────────

async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, ApiError> {
    Ok(Json(state.academics.list_rooms().await?))
}

async fn create_room(
    State(state): State<AppState>,
    Json(new): Json<NewRoom>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.academics.create_room(new).await?),
    ))
}

async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<RoomId>,
) -> Result<Json<Room>, ApiError> {
    Ok(Json(state.academics.get_room(id).await?))
}

async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<RoomId>,
    Json(patch): Json<RoomPatch>,
) -> Result<Json<Room>, ApiError> {
    Ok(Json(state.academics.update_room(id, patch).await?))
}

async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<RoomId>,
) -> Result<StatusCode, ApiError> {
    state.academics.delete_room(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Schedules ─────────────────────────────────────────────────────────────

async fn list_schedules(State(state): State<AppState>) -> Result<Json<Vec<Schedule>>, ApiError> {
    Ok(Json(state.academics.list_schedules().await?))
}

async fn create_schedule(
    State(state): State<AppState>,
    Json(new): Json<NewSchedule>,
) -> Result<(StatusCode, Json<Schedule>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.academics.create_schedule(new).await?),
    ))
}

async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<ScheduleId>,
) -> Result<Json<Schedule>, ApiError> {
    Ok(Json(state.academics.get_schedule(id).await?))
}

async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<ScheduleId>,
    Json(patch): Json<SchedulePatch>,
) -> Result<Json<Schedule>, ApiError> {
    Ok(Json(state.academics.update_schedule(id, patch).await?))
}

async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<ScheduleId>,
) -> Result<StatusCode, ApiError> {
    state.academics.delete_schedule(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Grades ────────────────────────────────────────────────────────────────

async fn list_grades(State(state): State<AppState>) -> Result<Json<Vec<GradeDetail>>, ApiError> {
    Ok(Json(state.academics.list_grades().await?))
}

async fn create_grade(
    State(state): State<AppState>,
    Json(new): Json<NewGrade>,
) -> Result<(StatusCode, Json<Grade>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.academics.create_grade(new).await?),
    ))
}

async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<GradeId>,
) -> Result<Json<GradeDetail>, ApiError> {
    Ok(Json(state.academics.get_grade(id).await?))
}

async fn list_grades_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<StudentId>,
) -> Result<Json<Vec<GradeDetail>>, ApiError> {
    Ok(Json(state.academics.list_grades_by_student(student_id).await?))
}

async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<GradeId>,
    Json(patch): Json<GradePatch>,
) -> Result<Json<Grade>, ApiError> {
    Ok(Json(state.academics.update_grade(id, patch).await?))
}

async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<GradeId>,
) -> Result<StatusCode, ApiError> {
    state.academics.delete_grade(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
