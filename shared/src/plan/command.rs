//! Plan commands - requests from an editor to modify the plan

use super::types::{AutoLayoutStyle, BanquetLayoutSpec, SeatGridSpec, TableMovement};
use crate::models::{AreaKind, AreaUpdate, EditorIdentity, HallSize, Point, TableCreate, TableSize, TableUpdate};
use serde::{Deserialize, Serialize};

/// Plan command envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCommand {
    /// Command unique ID (for idempotency and response matching)
    pub command_id: String,
    /// Editor issuing the command
    pub editor: EditorIdentity,
    /// Client timestamp (Unix milliseconds); also the clock for lock expiry
    pub timestamp: i64,
    /// Command payload
    pub payload: PlanCommandPayload,
}

impl PlanCommand {
    /// New command stamped with a fresh id and the current time
    pub fn new(editor: EditorIdentity, payload: PlanCommandPayload) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            editor,
            timestamp: crate::util::now_millis(),
            payload,
        }
    }

    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Command payload variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanCommandPayload {
    // ========== Areas ==========
    AddArea {
        points: Vec<Point>,
        #[serde(rename = "area_type", default)]
        kind: AreaKind,
    },
    UpdateArea {
        area_id: i64,
        patch: AreaUpdate,
    },
    DeleteArea {
        area_id: i64,
    },

    // ========== Tables ==========
    AddTable {
        #[serde(default)]
        spec: TableCreate,
    },
    MoveTable {
        table_id: i64,
        movement: TableMovement,
        /// Overrides the configured snap-to-grid default
        #[serde(default, skip_serializing_if = "Option::is_none")]
        snap: Option<bool>,
    },
    ResizeTable {
        table_id: i64,
        size: TableSize,
    },
    RotateTable {
        table_id: i64,
        delta_degrees: f64,
    },
    DuplicateTable {
        table_id: i64,
    },
    DeleteTable {
        table_id: i64,
    },
    UpdateTable {
        table_id: i64,
        patch: TableUpdate,
    },

    // ========== Seats (ceremony) ==========
    ToggleSeatEnabled {
        seat_id: i64,
    },

    // ========== Generators ==========
    GenerateSeatGrid {
        #[serde(default)]
        spec: SeatGridSpec,
    },
    GenerateBanquetLayout {
        #[serde(default)]
        spec: BanquetLayoutSpec,
    },
    ApplyAutoLayout {
        style: AutoLayoutStyle,
    },

    // ========== Assignments ==========
    /// `table_id: None` unassigns
    AssignGuestToTable {
        guest_id: i64,
        table_id: Option<i64>,
    },
    /// `seat_id: None` unassigns
    AssignGuestToSeat {
        guest_id: i64,
        seat_id: Option<i64>,
    },

    // ========== Hall ==========
    SetHallSize {
        hall: HallSize,
    },
}

impl PlanCommandPayload {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddArea { .. } => "add_area",
            Self::UpdateArea { .. } => "update_area",
            Self::DeleteArea { .. } => "delete_area",
            Self::AddTable { .. } => "add_table",
            Self::MoveTable { .. } => "move_table",
            Self::ResizeTable { .. } => "resize_table",
            Self::RotateTable { .. } => "rotate_table",
            Self::DuplicateTable { .. } => "duplicate_table",
            Self::DeleteTable { .. } => "delete_table",
            Self::UpdateTable { .. } => "update_table",
            Self::ToggleSeatEnabled { .. } => "toggle_seat_enabled",
            Self::GenerateSeatGrid { .. } => "generate_seat_grid",
            Self::GenerateBanquetLayout { .. } => "generate_banquet_layout",
            Self::ApplyAutoLayout { .. } => "apply_auto_layout",
            Self::AssignGuestToTable { .. } => "assign_guest_to_table",
            Self::AssignGuestToSeat { .. } => "assign_guest_to_seat",
            Self::SetHallSize { .. } => "set_hall_size",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_tagged_by_type() {
        let payload = PlanCommandPayload::AssignGuestToTable {
            guest_id: 4,
            table_id: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "ASSIGN_GUEST_TO_TABLE");
        assert!(json["table_id"].is_null());
    }

    #[test]
    fn move_table_accepts_both_movement_forms() {
        let cmd: PlanCommandPayload = serde_json::from_str(
            r#"{"type":"MOVE_TABLE","table_id":3,"movement":{"dx":10,"dy":0}}"#,
        )
        .unwrap();
        assert!(matches!(
            cmd,
            PlanCommandPayload::MoveTable {
                movement: TableMovement::By { .. },
                snap: None,
                ..
            }
        ));
        assert_eq!(cmd.name(), "move_table");
    }

    #[test]
    fn generators_default_their_spec() {
        let cmd: PlanCommandPayload =
            serde_json::from_str(r#"{"type":"GENERATE_BANQUET_LAYOUT"}"#).unwrap();
        assert_eq!(
            cmd,
            PlanCommandPayload::GenerateBanquetLayout {
                spec: BanquetLayoutSpec::default()
            }
        );
    }

    #[test]
    fn new_command_has_unique_id() {
        let editor = EditorIdentity::new("e1", "Eve");
        let a = PlanCommand::new(editor.clone(), PlanCommandPayload::DeleteArea { area_id: 1 });
        let b = PlanCommand::new(editor, PlanCommandPayload::DeleteArea { area_id: 1 });
        assert_ne!(a.command_id, b.command_id);
        assert_eq!(a.clone().at(42).timestamp, 42);
    }
}
