//! Seat Model (ceremony mode)

use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// Ceremony seat; holds at most one person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: i64,
    pub position: Point,
    /// Row index, 0 = front row
    pub row: u32,
    #[serde(default)]
    pub column: u32,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Seat {
    /// Seats hold one person; companions are not counted on seats
    pub const CAPACITY: u32 = 1;

    /// Display label such as "R3-12"
    pub fn label(&self) -> String {
        format!("R{}-{}", self.row + 1, self.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_one_based() {
        let seat = Seat {
            id: 1,
            position: Point::ORIGIN,
            row: 2,
            column: 11,
            enabled: true,
        };
        assert_eq!(seat.label(), "R3-12");
    }

    #[test]
    fn enabled_defaults_to_true() {
        let seat: Seat =
            serde_json::from_str(r#"{"id":5,"position":{"x":1,"y":2},"row":0}"#).unwrap();
        assert!(seat.enabled);
        assert_eq!(seat.column, 0);
    }
}
