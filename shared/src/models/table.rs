//! Table Model

use super::geometry::{Bounds, Footprint, Point};
use serde::{Deserialize, Serialize};

/// Default seat capacity of a new table
pub const DEFAULT_TABLE_CAPACITY: u32 = 8;
/// Default rectangle size (width x height)
pub const DEFAULT_RECT_SIZE: (f64, f64) = (80.0, 60.0);
/// Default round-table diameter
pub const DEFAULT_DIAMETER: f64 = 120.0;

/// Table outline shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    Rectangle,
    Circle,
}

/// Table dimensions; the variant determines the shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TableSize {
    Rectangle { width: f64, height: f64 },
    Circle { diameter: f64 },
}

impl Default for TableSize {
    fn default() -> Self {
        let (width, height) = DEFAULT_RECT_SIZE;
        TableSize::Rectangle { width, height }
    }
}

impl TableSize {
    pub fn shape(&self) -> TableShape {
        match self {
            TableSize::Rectangle { .. } => TableShape::Rectangle,
            TableSize::Circle { .. } => TableShape::Circle,
        }
    }

    /// All dimensions strictly positive and finite
    pub fn is_valid(&self) -> bool {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        match *self {
            TableSize::Rectangle { width, height } => ok(width) && ok(height),
            TableSize::Circle { diameter } => ok(diameter),
        }
    }

    /// Half-extent that bounds the table under any rotation
    pub fn rotation_insensitive_half_extent(&self) -> f64 {
        match *self {
            TableSize::Rectangle { width, height } => width.hypot(height) / 2.0,
            TableSize::Circle { diameter } => diameter / 2.0,
        }
    }

    /// Same footprint area, other shape (used when toggling shape)
    pub fn toggled(&self) -> TableSize {
        match *self {
            TableSize::Rectangle { width, height } => TableSize::Circle {
                diameter: width.max(height),
            },
            TableSize::Circle { diameter } => TableSize::Rectangle {
                width: diameter,
                height: diameter * DEFAULT_RECT_SIZE.1 / DEFAULT_RECT_SIZE.0,
            },
        }
    }
}

/// Banquet (or ceremony) table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub name: String,
    /// Centre position
    pub position: Point,
    #[serde(flatten)]
    pub size: TableSize,
    /// Rotation in degrees, normalised to [0, 360)
    #[serde(default)]
    pub rotation: f64,
    /// Number of people the table seats (≥ 1)
    pub capacity: u32,
    /// Locked in place by the user (no move/resize/rotate/delete)
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Table {
    pub fn shape(&self) -> TableShape {
        self.size.shape()
    }

    /// Region the table occupies, honouring rotation
    pub fn footprint(&self) -> Footprint {
        match self.size {
            TableSize::Circle { diameter } => Footprint::Circle {
                center: self.position,
                radius: diameter / 2.0,
            },
            TableSize::Rectangle { width, height } => {
                let local = Bounds::around(self.position, width / 2.0, height / 2.0);
                Footprint::Polygon(
                    local
                        .corners()
                        .iter()
                        .map(|c| c.rotated_around(&self.position, self.rotation))
                        .collect(),
                )
            }
        }
    }

    /// Tight axis-aligned bounds of the rotated footprint
    pub fn bounds(&self) -> Bounds {
        self.footprint().bounds()
    }

    /// Bounds that stay valid whatever the rotation (viewport fitting)
    pub fn rotation_insensitive_bounds(&self) -> Bounds {
        let half = self.size.rotation_insensitive_half_extent();
        Bounds::around(self.position, half, half)
    }
}

/// Normalise an angle in degrees to [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Create table payload; unset fields fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Auto-placed at the hall centre when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<TableSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

/// Update table payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: f64, height: f64, rotation: f64) -> Table {
        Table {
            id: 1,
            name: "Table 1".to_string(),
            position: Point::new(100.0, 100.0),
            size: TableSize::Rectangle { width, height },
            rotation,
            capacity: 8,
            locked: false,
            enabled: true,
        }
    }

    #[test]
    fn flattened_shape_tag_round_trips() {
        let table = rect(80.0, 60.0, 0.0);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["shape"], "rectangle");
        assert_eq!(json["width"], 80.0);

        let round: Table = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Round",
            "position": {"x": 0.0, "y": 0.0},
            "shape": "circle",
            "diameter": 120.0,
            "capacity": 10
        }))
        .unwrap();
        assert_eq!(round.shape(), TableShape::Circle);
        assert!(round.enabled);
        assert!(!round.locked);
    }

    #[test]
    fn rotated_bounds_grow() {
        let flat = rect(100.0, 20.0, 0.0).bounds();
        assert!((flat.width() - 100.0).abs() < 1e-9);
        let turned = rect(100.0, 20.0, 90.0).bounds();
        assert!((turned.width() - 20.0).abs() < 1e-9);
        assert!((turned.height() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_insensitive_bounds_cover_any_rotation() {
        let base = rect(80.0, 60.0, 0.0).rotation_insensitive_bounds();
        for angle in [0.0, 30.0, 45.0, 90.0, 133.0] {
            assert!(base.contains(&rect(80.0, 60.0, angle).bounds()));
        }
    }

    #[test]
    fn size_validation() {
        assert!(TableSize::default().is_valid());
        assert!(!TableSize::Circle { diameter: 0.0 }.is_valid());
        assert!(
            !TableSize::Rectangle {
                width: f64::NAN,
                height: 1.0
            }
            .is_valid()
        );
    }

    #[test]
    fn angle_normalisation() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }
}
