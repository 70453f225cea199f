//! Record Store for aulario.
//!
//! Models for the six record collections, capability traits per collection,
//! and [`MemoryStore`], an in-memory document store used by the service and
//! its tests. The production deployment points the same traits at a managed
//! document database; nothing above this crate knows which one.
//!
//! Two secondary indexes are part of the contract, not an optimization:
//! users are unique by external identity id and by email.

pub mod error;
pub mod memory;
pub mod models;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{
    AccountState, Grade, GradePatch, Role, Room, RoomPatch, Schedule, SchedulePatch, Student,
    StudentPatch, Subject, SubjectPatch, Teacher, TeacherPatch, User, UserRecordPatch,
};
pub use traits::{
    GradeStore, RecordStore, RoomStore, ScheduleStore, StudentStore, SubjectStore, TeacherStore,
    UserStore,
};

// Re-export async_trait for store implementors.
pub use async_trait::async_trait;
