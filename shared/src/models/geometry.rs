//! Planar geometry primitives for venue layout
//!
//! World coordinates are hall units (centimetres in practice) with the origin
//! at the top-left corner of the hall and `y` growing downwards.

use serde::{Deserialize, Serialize};

/// 2-D point in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Round both coordinates to the nearest multiple of `step`
    pub fn snapped(&self, step: f64) -> Self {
        if step <= 0.0 {
            return *self;
        }
        Self::new((self.x / step).round() * step, (self.y / step).round() * step)
    }

    /// Rotate around `pivot` by `degrees` (clockwise on screen, y down)
    pub fn rotated_around(&self, pivot: &Point, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Box of `center` ± (`half_w`, `half_h`)
    pub fn around(center: Point, half_w: f64, half_h: f64) -> Self {
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::from_point(*first);
        for p in iter {
            bounds.include_point(*p);
        }
        Some(bounds)
    }

    pub fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Whether `other` lies entirely inside `self`
    pub fn contains(&self, other: &Bounds) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Strict overlap (touching edges do not count)
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// Mean of the vertices; good enough for venue annotations
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Ray-casting point-in-polygon test; polygons need three or more vertices
pub fn polygon_contains(polygon: &[Point], p: &Point) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (&polygon[i], &polygon[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn orientation(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: &Point, b: &Point, p: &Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Whether segments `a1-a2` and `b1-b2` intersect (collinear overlap included)
pub fn segments_intersect(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b1, b2, a1))
        || (d2 == 0.0 && on_segment(b1, b2, a2))
        || (d3 == 0.0 && on_segment(a1, a2, b1))
        || (d4 == 0.0 && on_segment(a1, a2, b2))
}

/// Shortest distance from `p` to segment `a-b`
pub fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// Iterate the edges of a polyline; closed polylines also yield last→first
pub fn edges(points: &[Point], closed: bool) -> impl Iterator<Item = (&Point, &Point)> {
    let n = points.len();
    let count = if closed && n >= 3 { n } else { n.saturating_sub(1) };
    (0..count).map(move |i| (&points[i], &points[(i + 1) % n]))
}

/// Occupied region of a piece of furniture
#[derive(Debug, Clone, PartialEq)]
pub enum Footprint {
    /// Convex polygon (rotated rectangle corners)
    Polygon(Vec<Point>),
    Circle { center: Point, radius: f64 },
}

impl Footprint {
    pub fn bounds(&self) -> Bounds {
        match self {
            Footprint::Polygon(points) => {
                Bounds::from_points(points).unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
            }
            Footprint::Circle { center, radius } => Bounds::around(*center, *radius, *radius),
        }
    }

    /// Whether the footprint touches a polyline (or polygon when `closed`)
    pub fn intersects_outline(&self, outline: &[Point], closed: bool) -> bool {
        match self {
            Footprint::Polygon(poly) => {
                let crosses = edges(poly, true).any(|(a1, a2)| {
                    edges(outline, closed).any(|(b1, b2)| segments_intersect(a1, a2, b1, b2))
                });
                if crosses {
                    return true;
                }
                if closed && poly.iter().any(|p| polygon_contains(outline, p)) {
                    return true;
                }
                outline.iter().any(|p| polygon_contains(poly, p))
            }
            Footprint::Circle { center, radius } => {
                if closed && polygon_contains(outline, center) {
                    return true;
                }
                edges(outline, closed).any(|(a, b)| distance_to_segment(center, a, b) < *radius)
                    || (outline.len() == 1 && outline[0].distance_to(center) < *radius)
            }
        }
    }

    /// Whether the footprint crosses any edge of the outline
    pub fn crosses_outline(&self, outline: &[Point], closed: bool) -> bool {
        match self {
            Footprint::Polygon(poly) => edges(poly, true).any(|(a1, a2)| {
                edges(outline, closed).any(|(b1, b2)| segments_intersect(a1, a2, b1, b2))
            }),
            Footprint::Circle { center, radius } => {
                edges(outline, closed).any(|(a, b)| distance_to_segment(center, a, b) < *radius)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ]
    }

    #[test]
    fn snapping_rounds_to_step() {
        let p = Point::new(31.0, 49.0).snapped(20.0);
        assert_eq!(p, Point::new(40.0, 40.0));
        assert_eq!(Point::new(3.0, 4.0).snapped(0.0), Point::new(3.0, 4.0));
    }

    #[test]
    fn rotation_quarter_turn() {
        let p = Point::new(10.0, 0.0).rotated_around(&Point::ORIGIN, 90.0);
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_from_points_and_union() {
        let b = Bounds::from_points(&square(10.0)).unwrap();
        assert_eq!(b, Bounds::new(0.0, 0.0, 10.0, 10.0));
        assert!(Bounds::from_points(&[]).is_none());

        let u = b.union(&Bounds::new(-5.0, 2.0, 3.0, 20.0));
        assert_eq!(u, Bounds::new(-5.0, 0.0, 10.0, 20.0));
        assert_eq!(u.center(), Point::new(2.5, 10.0));
    }

    #[test]
    fn bounds_overlap_is_strict() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Bounds::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!a.intersects(&Bounds::new(10.0, 0.0, 20.0, 10.0)));
        assert!(a.contains(&Bounds::new(1.0, 1.0, 9.0, 9.0)));
    }

    #[test]
    fn point_in_polygon() {
        let sq = square(10.0);
        assert!(polygon_contains(&sq, &Point::new(5.0, 5.0)));
        assert!(!polygon_contains(&sq, &Point::new(15.0, 5.0)));
        assert!(!polygon_contains(&sq[..2], &Point::new(5.0, 0.0)));
    }

    #[test]
    fn segment_intersection() {
        let a1 = Point::new(0.0, 0.0);
        let a2 = Point::new(10.0, 10.0);
        assert!(segments_intersect(
            &a1,
            &a2,
            &Point::new(0.0, 10.0),
            &Point::new(10.0, 0.0)
        ));
        assert!(!segments_intersect(
            &a1,
            &a2,
            &Point::new(20.0, 0.0),
            &Point::new(30.0, 0.0)
        ));
    }

    #[test]
    fn circle_footprint_against_wall_line() {
        let wall = [Point::new(0.0, 100.0), Point::new(200.0, 100.0)];
        let near = Footprint::Circle {
            center: Point::new(50.0, 80.0),
            radius: 30.0,
        };
        let far = Footprint::Circle {
            center: Point::new(50.0, 20.0),
            radius: 30.0,
        };
        assert!(near.intersects_outline(&wall, false));
        assert!(!far.intersects_outline(&wall, false));
    }

    #[test]
    fn polygon_footprint_inside_obstacle() {
        let obstacle = square(100.0);
        let inside = Footprint::Polygon(vec![
            Point::new(40.0, 40.0),
            Point::new(60.0, 40.0),
            Point::new(60.0, 60.0),
            Point::new(40.0, 60.0),
        ]);
        assert!(inside.intersects_outline(&obstacle, true));
        assert!(!inside.crosses_outline(&obstacle, true));
    }
}
