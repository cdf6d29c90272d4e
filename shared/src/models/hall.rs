//! Hall and plan mode

use super::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HALL_WIDTH: f64 = 1800.0;
pub const DEFAULT_HALL_HEIGHT: f64 = 1200.0;

/// Venue floor dimensions, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HallSize {
    pub width: f64,
    pub height: f64,
    /// Minimum aisle width the planner should keep free
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aisle_min: Option<f64>,
}

impl Default for HallSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_HALL_WIDTH,
            height: DEFAULT_HALL_HEIGHT,
            aisle_min: None,
        }
    }
}

impl HallSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            aisle_min: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        ok(self.width) && ok(self.height) && self.aisle_min.is_none_or(|a| a.is_finite() && a >= 0.0)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

/// Editor tab; each mode has its own layout and history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// Rows of seats
    Ceremony,
    /// Tables
    #[default]
    Banquet,
}

impl PlanMode {
    pub const ALL: [PlanMode; 2] = [PlanMode::Ceremony, PlanMode::Banquet];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanMode::Ceremony => "ceremony",
            PlanMode::Banquet => "banquet",
        }
    }
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hall() {
        let hall = HallSize::default();
        assert_eq!(hall.width, 1800.0);
        assert_eq!(hall.height, 1200.0);
        assert_eq!(hall.center(), Point::new(900.0, 600.0));
        assert!(hall.is_valid());
    }

    #[test]
    fn rejects_degenerate_halls() {
        assert!(!HallSize::new(0.0, 100.0).is_valid());
        assert!(!HallSize::new(100.0, f64::INFINITY).is_valid());
        let mut hall = HallSize::default();
        hall.aisle_min = Some(-1.0);
        assert!(!hall.is_valid());
    }

    #[test]
    fn mode_serde() {
        assert_eq!(serde_json::to_string(&PlanMode::Ceremony).unwrap(), "\"ceremony\"");
        let mode: PlanMode = serde_json::from_str("\"banquet\"").unwrap();
        assert_eq!(mode, PlanMode::Banquet);
    }
}
