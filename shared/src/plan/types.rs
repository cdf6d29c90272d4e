//! Shared types for plan commands and responses

use crate::error::ErrorCode;
use crate::models::Point;
use serde::{Deserialize, Serialize};

// ============================================================================
// Command Response
// ============================================================================

/// Command response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Id of the area/table created by the command, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<i64>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, created_id: Option<i64>) -> Self {
        Self {
            command_id,
            success: true,
            created_id,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            created_id: None,
            error: Some(error),
        }
    }
}

/// Command error as surfaced to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
    /// Free places left on the target (capacity rejections only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_seats: Option<u32>,
    /// Display name of the lock holder (lock conflicts only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_owner: Option<String>,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            remaining_seats: None,
            lock_owner: None,
        }
    }

    pub fn with_remaining_seats(mut self, remaining: u32) -> Self {
        self.remaining_seats = Some(remaining);
        self
    }

    pub fn with_lock_owner(mut self, owner_name: impl Into<String>) -> Self {
        self.lock_owner = Some(owner_name.into());
        self
    }
}

// ============================================================================
// Command Parameters
// ============================================================================

/// Relative or absolute table movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableMovement {
    By { dx: f64, dy: f64 },
    To { x: f64, y: f64 },
}

impl TableMovement {
    /// Target centre for a table currently at `from`
    pub fn resolve(&self, from: Point) -> Point {
        match *self {
            TableMovement::By { dx, dy } => from.offset(dx, dy),
            TableMovement::To { x, y } => Point::new(x, y),
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            TableMovement::By { dx, dy } => dx.is_finite() && dy.is_finite(),
            TableMovement::To { x, y } => x.is_finite() && y.is_finite(),
        }
    }
}

/// Ceremony seat grid parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatGridSpec {
    pub rows: u32,
    pub cols: u32,
    /// Distance between neighbouring seats
    pub gap: f64,
    pub start_x: f64,
    pub start_y: f64,
    /// Columns with a 0-based index above this shift right by one extra gap;
    /// `None` = no aisle
    pub aisle_after: Option<u32>,
}

impl Default for SeatGridSpec {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 12,
            gap: 40.0,
            start_x: 100.0,
            start_y: 80.0,
            aisle_after: Some(6),
        }
    }
}

/// Banquet table grid parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanquetLayoutSpec {
    pub rows: u32,
    pub cols: u32,
    /// Capacity of each generated table
    pub seats: u32,
    pub gap_x: f64,
    pub gap_y: f64,
    pub start_x: f64,
    pub start_y: f64,
}

impl Default for BanquetLayoutSpec {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 4,
            seats: 8,
            gap_x: 140.0,
            gap_y: 160.0,
            start_x: 120.0,
            start_y: 160.0,
        }
    }
}

/// Automatic table arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoLayoutStyle {
    /// Centred grid
    Columns,
    /// Ring around the hall centre
    Circular,
    /// Two blocks separated by a central aisle
    Aisle,
}

// ============================================================================
// Event / Snapshot Parts
// ============================================================================

/// Derived guest assignment carried by snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatingAssignment {
    pub guest_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_id: Option<i64>,
}

/// New centre for one table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TablePosition {
    pub table_id: i64,
    pub position: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_is_untagged() {
        let by: TableMovement = serde_json::from_str(r#"{"dx":5,"dy":-2}"#).unwrap();
        assert_eq!(by.resolve(Point::new(10.0, 10.0)), Point::new(15.0, 8.0));
        let to: TableMovement = serde_json::from_str(r#"{"x":1,"y":2}"#).unwrap();
        assert_eq!(to.resolve(Point::new(10.0, 10.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn grid_spec_defaults_fill_missing_fields() {
        let spec: SeatGridSpec = serde_json::from_str(r#"{"rows":2}"#).unwrap();
        assert_eq!(spec.rows, 2);
        assert_eq!(spec.cols, 12);
        assert_eq!(spec.aisle_after, Some(6));
    }

    #[test]
    fn error_response_shape() {
        let resp = CommandResponse::error(
            "cmd-1".to_string(),
            CommandError::new(ErrorCode::CapacityExceeded, "full").with_remaining_seats(0),
        );
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], 2002);
        assert_eq!(json["error"]["remaining_seats"], 0);
        assert!(json.get("created_id").is_none());
    }
}
