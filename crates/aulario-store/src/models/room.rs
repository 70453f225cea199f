//! Room entity model.

use aulario_core::RoomId;
use serde::{Deserialize, Serialize};

/// A room record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier of the record.
    pub id: RoomId,

    /// Room number within the building.
    pub number: i32,

    /// Building name.
    pub building: String,

    /// Floor or level label ("planta baja", "2", ...). Free form.
    pub level: String,
}

/// Partial update of a room record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomPatch {
    pub number: Option<i32>,
    pub building: Option<String>,
    pub level: Option<String>,
}
