//! Zoom and pan for inspecting the circle construction.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level restored by [`ViewportState::reset`].
pub const DEFAULT_ZOOM: f64 = 1.6;
/// Zoom factor per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.12;
/// Zoom factor per zoom button press.
pub const BUTTON_ZOOM_STEP: f64 = 1.25;
pub const MIN_ZOOM: f64 = 0.4;
pub const MAX_ZOOM: f64 = 8.0;

/// Presentational zoom/pan applied on top of the fitted circle view.
///
/// Zoom scales about the surface center; the pan is added afterwards, so a
/// drag moves the picture by exactly the pointer delta at any zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan: Vec2,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
    /// Zoom level `reset` returns to.
    pub default_zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Vec2::ZERO,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface-to-surface transform: scale about the center, then pan.
    pub fn transform(&self, surface: Size) -> Affine {
        let center = Vec2::new(surface.width / 2.0, surface.height / 2.0);
        Affine::translate(self.pan + center) * Affine::scale(self.zoom) * Affine::translate(-center)
    }

    /// Map a pointer position back into the unzoomed surface.
    pub fn screen_to_view(&self, surface: Size, screen_point: Point) -> Point {
        self.transform(surface).inverse() * screen_point
    }

    /// Multiply the zoom by `factor`, clamped to the allowed range.
    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    /// Apply wheel notches; positive zooms in.
    pub fn zoom_wheel(&mut self, notches: i32) {
        self.zoom_by(WHEEL_ZOOM_STEP.powi(notches));
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(1.0 / BUTTON_ZOOM_STEP);
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Restore the default zoom and center the view.
    pub fn reset(&mut self) {
        self.zoom = self.default_zoom;
        self.pan = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Size = Size::new(400.0, 300.0);

    #[test]
    fn test_default_viewport() {
        let viewport = ViewportState::new();
        assert_eq!(viewport.pan, Vec2::ZERO);
        assert!((viewport.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_in_clamped() {
        let mut viewport = ViewportState::new();
        for _ in 0..100 {
            viewport.zoom_in();
            assert!(viewport.zoom <= MAX_ZOOM);
        }
        assert_eq!(viewport.zoom, MAX_ZOOM);
        for _ in 0..100 {
            viewport.zoom_wheel(1);
        }
        assert_eq!(viewport.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_zoom_out_clamped() {
        let mut viewport = ViewportState::new();
        for _ in 0..100 {
            viewport.zoom_wheel(-1);
            assert!(viewport.zoom >= MIN_ZOOM);
        }
        assert_eq!(viewport.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_zoom_steps() {
        let mut viewport = ViewportState::new();
        viewport.zoom = 1.0;
        viewport.zoom_wheel(1);
        assert!((viewport.zoom - 1.12).abs() < 1e-12);
        viewport.zoom = 1.0;
        viewport.zoom_in();
        assert!((viewport.zoom - 1.25).abs() < 1e-12);
        viewport.zoom_out();
        assert!((viewport.zoom - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_center_is_fixed_under_zoom() {
        let mut viewport = ViewportState::new();
        viewport.zoom = 3.0;
        let center = Point::new(200.0, 150.0);
        let mapped = viewport.transform(SURFACE) * center;
        assert!((mapped - center).hypot() < 1e-9);
    }

    #[test]
    fn test_pan_independent_of_zoom() {
        let point = Point::new(50.0, 80.0);
        for zoom in [0.4, 1.0, 2.5, 8.0] {
            let mut viewport = ViewportState::new();
            viewport.zoom = zoom;
            let before = viewport.transform(SURFACE) * point;
            viewport.pan_by(Vec2::new(30.0, -10.0));
            let after = viewport.transform(SURFACE) * point;
            assert!(((after - before) - Vec2::new(30.0, -10.0)).hypot() < 1e-9);
        }
    }

    #[test]
    fn test_screen_to_view_roundtrip() {
        let mut viewport = ViewportState::new();
        viewport.zoom = 2.2;
        viewport.pan = Vec2::new(-14.0, 33.0);
        let original = Point::new(123.0, 45.0);
        let screen = viewport.transform(SURFACE) * original;
        let back = viewport.screen_to_view(SURFACE, screen);
        assert!((back - original).hypot() < 1e-9);
    }

    #[test]
    fn test_reset() {
        let mut viewport = ViewportState::new();
        viewport.zoom_in();
        viewport.pan_by(Vec2::new(10.0, 20.0));
        viewport.reset();
        assert_eq!(viewport.zoom, DEFAULT_ZOOM);
        assert_eq!(viewport.pan, Vec2::ZERO);
    }
}
