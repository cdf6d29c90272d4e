//! Viewport controller
//!
//! Maps world coordinates (hall units) to screen pixels:
//! `screen = world * scale + offset`.
//!
//! Pan input is queued and committed at most once per frame. The zoom floor
//! follows the content: whenever content bounds change it becomes the
//! fit-to-content scale, without touching the current zoom.

use crate::core::PlannerConfig;
use serde::{Deserialize, Serialize};
use shared::models::{Bounds, Point};

/// Content narrower than this is treated as this wide when fitting
const MIN_CONTENT_EXTENT: f64 = 10.0;
const DEFAULT_VIEW_SIZE: (f64, f64) = (800.0, 600.0);

/// Current transform, as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub scale: f64,
    pub offset: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ORIGIN,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    scale: f64,
    offset: Point,
    view_width: f64,
    view_height: f64,
    /// Dynamic zoom floor, never below the configured one
    min_scale: f64,
    config_min_scale: f64,
    max_scale: f64,
    padding: f64,
    pending_pan: Option<(f64, f64)>,
}

impl ViewportController {
    pub fn new(config: &PlannerConfig) -> Self {
        let (view_width, view_height) = DEFAULT_VIEW_SIZE;
        Self {
            scale: 1.0,
            offset: Point::ORIGIN,
            view_width,
            view_height,
            min_scale: config.min_scale,
            config_min_scale: config.min_scale,
            max_scale: config.max_scale.max(config.min_scale),
            padding: config.fit_padding,
            pending_pan: None,
        }
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            scale: self.scale,
            offset: self.offset,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Resize the drawing surface (pixels); non-positive sizes are ignored
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.view_width = width;
            self.view_height = height;
        }
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Scale that fits `bounds` into the view, limited to the configured range
    fn fit_scale(&self, bounds: &Bounds) -> f64 {
        let content_w = bounds.width().max(MIN_CONTENT_EXTENT);
        let content_h = bounds.height().max(MIN_CONTENT_EXTENT);
        let scale_x = (self.view_width - self.padding) / content_w;
        let scale_y = (self.view_height - self.padding) / content_h;
        scale_x
            .min(scale_y)
            .clamp(self.config_min_scale, self.max_scale)
    }

    /// Fit and centre the content; an empty scene resets to identity
    pub fn fit_to_content(&mut self, bounds: Option<Bounds>) -> ViewportState {
        self.pending_pan = None;
        let Some(bounds) = bounds else {
            self.min_scale = self.config_min_scale;
            self.scale = 1.0;
            self.offset = Point::ORIGIN;
            return self.state();
        };

        let scale = self.fit_scale(&bounds);
        self.min_scale = scale;
        self.scale = scale;
        let center = bounds.center();
        self.offset = Point::new(
            self.view_width / 2.0 - center.x * scale,
            self.view_height / 2.0 - center.y * scale,
        );
        self.state()
    }

    /// Content changed: recompute the zoom floor, keep the current view
    pub fn update_content_bounds(&mut self, bounds: Option<Bounds>) {
        self.min_scale = match bounds {
            Some(bounds) => self.fit_scale(&bounds),
            None => self.config_min_scale,
        };
    }

    /// Zoom by `factor` keeping the world point under `anchor` (screen px) fixed
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) -> ViewportState {
        if !factor.is_finite() || factor <= 0.0 || !anchor.is_finite() {
            return self.state();
        }
        let world = self.screen_to_world(anchor);
        let scale = self.clamp_scale(self.scale * factor);
        self.scale = scale;
        self.offset = Point::new(anchor.x - world.x * scale, anchor.y - world.y * scale);
        self.state()
    }

    /// Zoom around the view centre
    pub fn zoom_centered(&mut self, factor: f64) -> ViewportState {
        let anchor = Point::new(self.view_width / 2.0, self.view_height / 2.0);
        self.zoom_at(factor, anchor)
    }

    /// Accumulate pan input until the next frame
    pub fn queue_pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let (px, py) = self.pending_pan.unwrap_or((0.0, 0.0));
        self.pending_pan = Some((px + dx, py + dy));
    }

    /// Commit queued pan input; `None` when nothing was queued
    pub fn flush_frame(&mut self) -> Option<ViewportState> {
        let (dx, dy) = self.pending_pan.take()?;
        self.offset = self.offset.offset(dx, dy);
        Some(self.state())
    }

    /// Put a world point at the centre of the view
    pub fn center_on(&mut self, world: Point) -> ViewportState {
        self.offset = Point::new(
            self.view_width / 2.0 - world.x * self.scale,
            self.view_height / 2.0 - world.y * self.scale,
        );
        self.state()
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportController {
        let mut v = ViewportController::new(&PlannerConfig::defaults());
        v.set_view_size(840.0, 640.0);
        v
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_scene_fits_to_identity() {
        let mut v = viewport();
        v.zoom_at(2.0, Point::new(10.0, 10.0));
        let state = v.fit_to_content(None);
        assert_eq!(state, ViewportState::default());
    }

    #[test]
    fn fit_centres_content() {
        let mut v = viewport();
        // 800 x 300 content: x limits (840 - 40) / 800 = 1.0
        let bounds = Bounds::new(100.0, 100.0, 900.0, 400.0);
        let state = v.fit_to_content(Some(bounds));
        assert!(close(state.scale, 1.0));
        let centre = v.world_to_screen(bounds.center());
        assert!(close(centre.x, 420.0));
        assert!(close(centre.y, 320.0));
    }

    #[test]
    fn fit_scale_is_clamped() {
        let mut v = viewport();
        let tiny = Bounds::new(0.0, 0.0, 1.0, 1.0);
        assert!(close(v.fit_to_content(Some(tiny)).scale, 4.0));
        let huge = Bounds::new(0.0, 0.0, 100_000.0, 100_000.0);
        assert!(close(v.fit_to_content(Some(huge)).scale, 0.2));
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut v = viewport();
        v.fit_to_content(Some(Bounds::new(0.0, 0.0, 1600.0, 1200.0)));
        let cursor = Point::new(300.0, 200.0);
        let before = v.screen_to_world(cursor);
        v.zoom_at(1.5, cursor);
        let after = v.world_to_screen(before);
        assert!(close(after.x, cursor.x));
        assert!(close(after.y, cursor.y));
    }

    #[test]
    fn zoom_is_clamped_to_floor_and_ceiling() {
        let mut v = viewport();
        v.zoom_at(100.0, Point::ORIGIN);
        assert!(close(v.scale(), 4.0));
        v.zoom_at(0.0001, Point::ORIGIN);
        assert!(close(v.scale(), v.min_scale()));
    }

    #[test]
    fn content_change_moves_floor_only() {
        let mut v = viewport();
        v.zoom_at(3.0, Point::ORIGIN);
        let before = v.state();
        v.update_content_bounds(Some(Bounds::new(0.0, 0.0, 4000.0, 3000.0)));
        assert_eq!(v.state(), before);
        assert!(close(v.min_scale(), 0.2));

        v.update_content_bounds(Some(Bounds::new(0.0, 0.0, 400.0, 300.0)));
        assert!(close(v.min_scale(), 2.0));
        assert_eq!(v.state(), before);
    }

    #[test]
    fn pans_are_coalesced_per_frame() {
        let mut v = viewport();
        assert!(v.flush_frame().is_none());
        v.queue_pan(5.0, 1.0);
        v.queue_pan(5.0, 1.0);
        v.queue_pan(-2.0, 3.0);
        let state = v.flush_frame().unwrap();
        assert_eq!(state.offset, Point::new(8.0, 5.0));
        assert!(v.flush_frame().is_none());
    }

    #[test]
    fn center_on_puts_point_mid_view() {
        let mut v = viewport();
        v.center_on(Point::new(1000.0, 500.0));
        let screen = v.world_to_screen(Point::new(1000.0, 500.0));
        assert_eq!(screen, Point::new(420.0, 320.0));
    }
}
