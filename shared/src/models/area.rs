//! Area Model

use super::geometry::{Bounds, Point, centroid};
use serde::{Deserialize, Serialize};

/// Semantic type of a floor-plan annotation
///
/// Unrecognised labels fold to [`AreaKind::Free`] on deserialization, so
/// every stored area always has a resolvable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum AreaKind {
    /// Hall perimeter / walls
    Boundary,
    Aisle,
    Door,
    /// Columns, pillars and anything tables must not overlap
    Obstacle,
    /// Stage or head-table zone (VIP proximity anchor)
    Stage,
    Vendor,
    Kids,
    #[default]
    Free,
}

impl AreaKind {
    /// Resolve a free-form label, case-insensitively, with a few synonyms
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "boundary" | "perimeter" | "wall" | "walls" => Self::Boundary,
            "aisle" | "corridor" | "walkway" => Self::Aisle,
            "door" | "entrance" | "exit" => Self::Door,
            "obstacle" | "column" | "pillar" => Self::Obstacle,
            "stage" | "head" | "head_table" | "altar" | "dancefloor" => Self::Stage,
            "vendor" | "bar" | "buffet" => Self::Vendor,
            "kids" | "children" | "kids_area" => Self::Kids,
            _ => Self::Free,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boundary => "boundary",
            Self::Aisle => "aisle",
            Self::Door => "door",
            Self::Obstacle => "obstacle",
            Self::Stage => "stage",
            Self::Vendor => "vendor",
            Self::Kids => "kids",
            Self::Free => "free",
        }
    }

    /// Tables may not overlap these areas
    pub fn blocks_tables(&self) -> bool {
        matches!(self, Self::Boundary | Self::Obstacle)
    }
}

impl From<String> for AreaKind {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<&str> for AreaKind {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl std::fmt::Display for AreaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polygon or polyline annotation on the floor plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: AreaKind,
    /// Ordered outline; two points form a line, three or more a polygon
    pub points: Vec<Point>,
}

impl Area {
    /// Minimum outline length accepted by `add_area`
    pub const MIN_POINTS: usize = 2;

    pub fn is_polygon(&self) -> bool {
        self.points.len() >= 3
    }

    pub fn centroid(&self) -> Option<Point> {
        centroid(&self.points)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}

/// Partial update for an area
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AreaKind>,
}
