//! Entity models for the six record collections.

mod grade;
mod room;
mod schedule;
mod student;
mod subject;
mod teacher;
mod user;

pub use grade::{Grade, GradePatch};
pub use room::{Room, RoomPatch};
pub use schedule::{Schedule, SchedulePatch};
pub use student::{Student, StudentPatch};
pub use subject::{Subject, SubjectPatch};
pub use teacher::{Teacher, TeacherPatch};
pub use user::{AccountState, Role, User, UserRecordPatch};
