//! Layout generators
//!
//! Seat grids and banquet grids for the generator commands, plus the
//! automatic table arrangements (columns, circular, aisle).

use shared::models::table::DEFAULT_RECT_SIZE;
use shared::models::{HallSize, Point, Seat, Table, TableSize};
use shared::plan::{AutoLayoutStyle, BanquetLayoutSpec, SeatGridSpec};
use std::f64::consts::PI;

/// Footprint assumed for every table by the automatic arrangements
pub const AUTO_TABLE_DIAMETER: f64 = 120.0;
/// Spacing never shrinks below this when the hall is crowded
pub const ABSOLUTE_MIN_SPACING: f64 = 100.0;
/// Upper bound on seats / tables a single generator command may produce
pub const MAX_GENERATED_ITEMS: u32 = 10_000;
const GRID_MIN_SPACING: f64 = 120.0;
const CIRCULAR_MIN_SPACING: f64 = 100.0;
const AISLE_WIDTH: f64 = 250.0;

/// Ceremony seat rows; ids are drawn from `next_id`
pub fn seat_grid(spec: &SeatGridSpec, mut next_id: impl FnMut() -> i64) -> Vec<Seat> {
    let mut seats = Vec::with_capacity((spec.rows * spec.cols) as usize);
    for row in 0..spec.rows {
        for col in 0..spec.cols {
            let aisle = match spec.aisle_after {
                Some(after) if col > after => spec.gap,
                _ => 0.0,
            };
            seats.push(Seat {
                id: next_id(),
                position: Point::new(
                    spec.start_x + col as f64 * spec.gap + aisle,
                    spec.start_y + row as f64 * spec.gap,
                ),
                row,
                column: col,
                enabled: true,
            });
        }
    }
    seats
}

/// Banquet grid of 80 x 60 rectangles named "Table N"
pub fn banquet_tables(spec: &BanquetLayoutSpec, mut next_id: impl FnMut() -> i64) -> Vec<Table> {
    let (width, height) = DEFAULT_RECT_SIZE;
    let mut tables = Vec::with_capacity((spec.rows * spec.cols) as usize);
    for row in 0..spec.rows {
        for col in 0..spec.cols {
            let number = tables.len() + 1;
            tables.push(Table {
                id: next_id(),
                name: format!("Table {number}"),
                position: Point::new(
                    spec.start_x + col as f64 * spec.gap_x,
                    spec.start_y + row as f64 * spec.gap_y,
                ),
                size: TableSize::Rectangle { width, height },
                rotation: 0.0,
                capacity: spec.seats,
                locked: false,
                enabled: true,
            });
        }
    }
    tables
}

/// Rows and columns of the squarest grid holding `count` items
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    (rows, cols)
}

/// Centres for `count` tables in the requested arrangement
pub fn auto_layout_positions(style: AutoLayoutStyle, count: usize, hall: &HallSize) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    match style {
        AutoLayoutStyle::Columns => columns_layout(count, hall),
        AutoLayoutStyle::Circular => circular_layout(count, hall),
        AutoLayoutStyle::Aisle => aisle_layout(count, hall),
    }
}

fn columns_layout(count: usize, hall: &HallSize) -> Vec<Point> {
    let (rows, cols) = grid_dimensions(count);
    let (margin_x, margin_y) = (120.0, 160.0);
    let d = AUTO_TABLE_DIAMETER;
    let available_w = hall.width - margin_x * 2.0;
    let available_h = hall.height - margin_y * 2.0;

    let spacing = |n: usize, available: f64| {
        let needed = n as f64 * d + (n.saturating_sub(1)) as f64 * GRID_MIN_SPACING;
        if needed > available {
            let gaps = n.saturating_sub(1).max(1) as f64;
            ABSOLUTE_MIN_SPACING.max((available - n as f64 * d) / gaps)
        } else {
            GRID_MIN_SPACING
        }
    };
    let spacing_x = spacing(cols, available_w);
    let spacing_y = spacing(rows, available_h);

    let grid_w = cols as f64 * d + (cols - 1) as f64 * spacing_x;
    let grid_h = rows as f64 * d + (rows - 1) as f64 * spacing_y;
    let start_x = margin_x + (available_w - grid_w) / 2.0;
    let start_y = margin_y + (available_h - grid_h) / 2.0;

    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            Point::new(
                start_x + d / 2.0 + col as f64 * (d + spacing_x),
                start_y + d / 2.0 + row as f64 * (d + spacing_y),
            )
        })
        .collect()
}

fn circular_layout(count: usize, hall: &HallSize) -> Vec<Point> {
    let center = hall.center();
    let circumference = count as f64 * (AUTO_TABLE_DIAMETER + CIRCULAR_MIN_SPACING.max(ABSOLUTE_MIN_SPACING));
    let radius = (circumference / (2.0 * PI)).min(hall.width.min(hall.height) * 0.4);
    let step = 2.0 * PI / count as f64;

    (0..count)
        .map(|i| {
            // start at twelve o'clock
            let angle = i as f64 * step - PI / 2.0;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

fn aisle_layout(count: usize, hall: &HallSize) -> Vec<Point> {
    let (rows, _) = grid_dimensions(count);
    let cols_per_side = count.div_ceil(rows).div_ceil(2).max(1);
    let (margin_x, margin_y) = (100.0, 160.0);
    let d = AUTO_TABLE_DIAMETER;
    let side_width = (hall.width - margin_x * 2.0 - AISLE_WIDTH) / 2.0;

    let spacing_x = if cols_per_side > 1 {
        ABSOLUTE_MIN_SPACING.max((side_width - d) / cols_per_side as f64)
    } else {
        GRID_MIN_SPACING
    };
    let available_h = hall.height - margin_y * 2.0 - rows as f64 * d;
    let spacing_y = if rows > 1 {
        ABSOLUTE_MIN_SPACING.max(available_h / rows as f64)
    } else {
        GRID_MIN_SPACING
    };

    let per_row = cols_per_side * 2;
    (0..count)
        .map(|i| {
            let row = i / per_row;
            let left = i % per_row < cols_per_side;
            let col = i % cols_per_side;
            let base = if left {
                margin_x
            } else {
                margin_x + side_width + AISLE_WIDTH
            };
            Point::new(
                base + d / 2.0 + col as f64 * (d + spacing_x),
                margin_y + d / 2.0 + row as f64 * (d + spacing_y),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(start: i64) -> impl FnMut() -> i64 {
        let mut next = start;
        move || {
            next += 1;
            next - 1
        }
    }

    #[test]
    fn seat_grid_inserts_aisle_gap() {
        let seats = seat_grid(&SeatGridSpec::default(), counter(1));
        assert_eq!(seats.len(), 120);
        // columns 0..=6 are contiguous, column 7 jumps by an extra gap
        assert_eq!(seats[6].position.x, 100.0 + 6.0 * 40.0);
        assert_eq!(seats[7].position.x, 100.0 + 7.0 * 40.0 + 40.0);
        assert_eq!(seats[12].position.y, 80.0 + 40.0);
        assert_eq!(seats[12].row, 1);
        assert_eq!(seats[0].id, 1);
        assert_eq!(seats[119].id, 120);
    }

    #[test]
    fn seat_grid_without_aisle() {
        let spec = SeatGridSpec {
            rows: 1,
            cols: 3,
            aisle_after: None,
            ..Default::default()
        };
        let xs: Vec<f64> = seat_grid(&spec, counter(1)).iter().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![100.0, 140.0, 180.0]);
    }

    #[test]
    fn banquet_grid_names_and_sizes() {
        let tables = banquet_tables(&BanquetLayoutSpec::default(), counter(100));
        assert_eq!(tables.len(), 12);
        assert_eq!(tables[0].name, "Table 1");
        assert_eq!(tables[11].name, "Table 12");
        assert_eq!(tables[5].position, Point::new(120.0 + 140.0, 160.0 + 160.0));
        assert!(tables.iter().all(|t| t.capacity == 8));
        assert_eq!(
            tables[0].size,
            TableSize::Rectangle {
                width: 80.0,
                height: 60.0
            }
        );
    }

    #[test]
    fn grid_dimensions_are_squarish() {
        assert_eq!(grid_dimensions(0), (0, 0));
        assert_eq!(grid_dimensions(1), (1, 1));
        assert_eq!(grid_dimensions(5), (2, 3));
        assert_eq!(grid_dimensions(9), (3, 3));
        assert_eq!(grid_dimensions(10), (3, 4));
    }

    #[test]
    fn columns_layout_is_centred_and_spaced() {
        let hall = HallSize::default();
        let points = auto_layout_positions(AutoLayoutStyle::Columns, 4, &hall);
        assert_eq!(points.len(), 4);
        let cx = points.iter().map(|p| p.x).sum::<f64>() / 4.0;
        let cy = points.iter().map(|p| p.y).sum::<f64>() / 4.0;
        assert!((cx - 900.0).abs() < 1e-6);
        assert!((cy - 600.0).abs() < 1e-6);
        assert!(points[0].distance_to(&points[1]) >= AUTO_TABLE_DIAMETER + ABSOLUTE_MIN_SPACING);
    }

    #[test]
    fn circular_layout_starts_at_top_and_stays_in_hall() {
        let hall = HallSize::default();
        let points = auto_layout_positions(AutoLayoutStyle::Circular, 30, &hall);
        let center = hall.center();
        assert!((points[0].x - center.x).abs() < 1e-6);
        assert!(points[0].y < center.y);
        let max_r = 1200.0 * 0.4;
        assert!(points.iter().all(|p| p.distance_to(&center) <= max_r + 1e-6));
    }

    #[test]
    fn aisle_layout_keeps_the_aisle_free() {
        let hall = HallSize::default();
        let points = auto_layout_positions(AutoLayoutStyle::Aisle, 8, &hall);
        let side_width = (1800.0 - 200.0 - 250.0) / 2.0;
        let aisle_start = 100.0 + side_width;
        let aisle_end = aisle_start + 250.0;
        for p in &points {
            let left_edge = p.x - AUTO_TABLE_DIAMETER / 2.0;
            let right_edge = p.x + AUTO_TABLE_DIAMETER / 2.0;
            assert!(right_edge <= aisle_start + 1e-6 || left_edge >= aisle_end - 1e-6);
        }
    }

    #[test]
    fn empty_layout() {
        assert!(auto_layout_positions(AutoLayoutStyle::Aisle, 0, &HallSize::default()).is_empty());
    }
}
