//! Schedule entity model.
//!
//! The source system stores a schedule as an opaque column-layout string
//! rendered by the presentation layer; the store keeps it that way.

use aulario_core::ScheduleId;
use serde::{Deserialize, Serialize};

/// A schedule record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique identifier of the record.
    pub id: ScheduleId,

    /// Opaque column layout, interpreted by the presentation layer only.
    pub columns: String,
}

/// Partial update of a schedule record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulePatch {
    pub columns: Option<String>,
}
