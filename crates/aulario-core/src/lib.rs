//! aulario core library
//!
//! Shared types for the aulario school-administration services.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers for every record collection
//! - [`error`] - The shared error taxonomy ([`AularioError`])

pub mod error;
pub mod ids;

pub use error::{AularioError, Result};
pub use ids::{GradeId, RoomId, ScheduleId, StudentId, SubjectId, TeacherId, UserId};
