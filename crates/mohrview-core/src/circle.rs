//! Mohr's circle construction geometry.
//!
//! Points live in stress space as `Point { x: σ, y: τ }`. Screen space grows
//! downward, so a positive shear is drawn below the stress axis; every point
//! derived here goes through [`CircleGeometry::point_on`], which keeps that
//! inversion in one place.
//!
//! Angles are radians measured counterclockwise as seen on screen, i.e. in a
//! y-up frame whose vertical axis is `-τ`. In that frame the reference point
//! sits at `atan2(-τxy, (σx - σy)/2)` and a face rotation of `θ` moves the
//! live point by `+2θ`, so it reaches `P1` exactly at `θ = θp1`.

use crate::interaction::Marker;
use crate::stress::{StressState, compute_principal};
use kurbo::{Point, Size, Vec2};
use std::f64::consts::PI;

/// Pixels kept clear around the circle when fitting the viewport.
pub const SCALE_MARGIN_PX: f64 = 40.0;
/// Stress units added to the fitted extent.
pub const SCALE_MARGIN_STRESS: f64 = 10.0;
/// Smallest pixels-per-stress-unit scale.
pub const MIN_DISPLAY_SCALE: f64 = 0.5;
/// Largest pixels-per-stress-unit scale.
pub const MAX_DISPLAY_SCALE: f64 = 8.0;
/// Hover radius of a circle marker in screen pixels.
pub const MARKER_RADIUS: f64 = 7.0;

/// Visual direction of an arc on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    CounterClockwise,
    Clockwise,
}

impl SweepDirection {
    /// The one sign convention for every arc in the construction.
    ///
    /// Non-negative angles sweep counterclockwise, negative ones clockwise.
    pub fn for_angle(angle_deg: f64) -> Self {
        if angle_deg >= 0.0 {
            SweepDirection::CounterClockwise
        } else {
            SweepDirection::Clockwise
        }
    }

    /// SVG `sweep-flag` for a y-down surface.
    pub fn svg_flag(self) -> bool {
        matches!(self, SweepDirection::Clockwise)
    }
}

/// An arc on the circle, from `start_angle` turning by `sweep_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcDescriptor {
    /// Start angle in radians.
    pub start_angle: f64,
    /// Signed turn in radians; positive is counterclockwise.
    pub sweep_angle: f64,
    /// Whether the arc covers more than half the circle.
    pub large_arc: bool,
    pub sweep: SweepDirection,
}

impl ArcDescriptor {
    /// Arc depicting a face rotation of `angle_deg`, which turns `2 * angle_deg`
    /// around the circle.
    fn for_face_rotation(start_angle: f64, angle_deg: f64) -> Self {
        let doubled = 2.0 * angle_deg;
        Self {
            start_angle,
            sweep_angle: doubled.to_radians(),
            large_arc: doubled.abs() > 180.0,
            sweep: SweepDirection::for_angle(angle_deg),
        }
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }
}

/// Tick marks along the stress axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSet {
    pub step: f64,
    pub max_tick: f64,
    /// Ascending from `-max_tick` to `max_tick`.
    pub values: Vec<f64>,
}

/// Interactive markers drawn on the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircleMarker {
    /// The unrotated x face.
    Reference,
    /// The rotated x face.
    Live,
    /// The rotated y face.
    Conjugate,
    Principal1,
    Principal2,
}

/// Everything needed to draw the construction for one stress state and angle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleGeometry {
    /// `(σavg, 0)` in stress space.
    pub center: Point,
    pub radius: f64,
    /// Rotation angle in degrees the geometry was built for.
    pub theta: f64,
    pub reference_angle: f64,
    pub live_angle: f64,
    pub conjugate_angle: f64,
    /// Arc from the reference point to the live point.
    pub rotation_arc: ArcDescriptor,
    /// Arc from the reference point to `P1`; absent for a point circle.
    pub principal_arc: Option<ArcDescriptor>,
    /// Pixels per stress unit.
    pub scale: f64,
    pub viewport: Size,
    pub ticks: TickSet,
}

/// Fit the construction into the viewport.
///
/// `clamp((min(W, H)/2 - margin) / (max|component| + R + margin2), 0.5, 8)`.
pub fn display_scale(state: &StressState, viewport: Size) -> f64 {
    let available = viewport.width.min(viewport.height) / 2.0 - SCALE_MARGIN_PX;
    let extent = state.max_abs_component() + state.radius() + SCALE_MARGIN_STRESS;
    let scale = available / extent;
    if scale.is_nan() {
        return MIN_DISPLAY_SCALE;
    }
    scale.clamp(MIN_DISPLAY_SCALE, MAX_DISPLAY_SCALE)
}

/// Smallest `{1, 2, 5, 10} × 10^k` that is at least `raw`.
pub fn tick_step(raw: f64) -> f64 {
    if !(raw > 0.0) || !raw.is_finite() {
        return 1.0;
    }
    let base = 10f64.powi(raw.log10().floor() as i32);
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * base)
        .find(|step| *step >= raw)
        .unwrap_or(20.0 * base)
}

/// Axis ticks covering `|σavg| + R` on both sides of the origin.
pub fn ticks(state: &StressState, scale: f64) -> TickSet {
    let extent = state.radius() + state.sigma_avg().abs();
    let step = tick_step(extent / scale / 4.0);
    let count = (extent / step).ceil() as i64;
    TickSet {
        step,
        max_tick: count as f64 * step,
        values: (-count..=count).map(|i| i as f64 * step).collect(),
    }
}

/// Map a stress state and rotation into circle construction geometry.
pub fn map_to_circle_geometry(
    state: &StressState,
    theta_deg: f64,
    viewport: Size,
) -> CircleGeometry {
    let raw_diff = state.half_diff();
    // Never let -0.0 or NaN reach atan2.
    let diff = if raw_diff == 0.0 || raw_diff.is_nan() {
        0.0
    } else {
        raw_diff
    };
    let reference_angle = (-state.tau_xy).atan2(diff);
    let live_angle = reference_angle + 2.0 * theta_deg.to_radians();

    let principal_arc = compute_principal(state)
        .ok()
        .map(|p| ArcDescriptor::for_face_rotation(reference_angle, p.theta_p1));

    let scale = display_scale(state, viewport);
    CircleGeometry {
        center: Point::new(state.sigma_avg(), 0.0),
        radius: state.radius(),
        theta: theta_deg,
        reference_angle,
        live_angle,
        conjugate_angle: live_angle + PI,
        rotation_arc: ArcDescriptor::for_face_rotation(reference_angle, theta_deg),
        principal_arc,
        scale,
        viewport,
        ticks: ticks(state, scale),
    }
}

impl CircleGeometry {
    /// Stress-space point at `angle` on the circle.
    pub fn point_at(&self, angle: f64) -> Point {
        self.point_on(angle, self.radius)
    }

    /// Stress-space point at `angle` on a concentric circle of `radius`.
    pub fn point_on(&self, angle: f64, radius: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.center.x + radius * cos, -radius * sin)
    }

    /// `(σx, τxy)` of the unrotated face.
    pub fn reference_point(&self) -> Point {
        self.point_at(self.reference_angle)
    }

    /// `(σx', τxy')` of the rotated face.
    pub fn live_point(&self) -> Point {
        self.point_at(self.live_angle)
    }

    /// `(σy', -τxy')` of the rotated face.
    pub fn conjugate_point(&self) -> Point {
        self.point_at(self.conjugate_angle)
    }

    /// `(σ1, 0)`.
    pub fn p1(&self) -> Point {
        self.point_at(0.0)
    }

    /// `(σ2, 0)`.
    pub fn p2(&self) -> Point {
        self.point_at(PI)
    }

    pub fn is_point_circle(&self) -> bool {
        self.principal_arc.is_none()
    }

    /// Screen position of a stress-space point, origin at the viewport center.
    pub fn to_screen(&self, point: Point) -> Point {
        self.origin() + Vec2::new(point.x, point.y) * self.scale
    }

    /// Screen position of the stress origin.
    pub fn origin(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    pub fn screen_radius(&self) -> f64 {
        self.radius * self.scale
    }

    /// Screen endpoints of an arc drawn at `fraction` of the circle radius.
    pub fn arc_endpoints(&self, arc: &ArcDescriptor, fraction: f64) -> (Point, Point) {
        let radius = self.radius * fraction;
        (
            self.to_screen(self.point_on(arc.start_angle, radius)),
            self.to_screen(self.point_on(arc.end_angle(), radius)),
        )
    }

    /// Hoverable markers in screen space, in paint order.
    pub fn markers(&self) -> Vec<Marker<CircleMarker>> {
        [
            (CircleMarker::Principal1, self.p1()),
            (CircleMarker::Principal2, self.p2()),
            (CircleMarker::Reference, self.reference_point()),
            (CircleMarker::Conjugate, self.conjugate_point()),
            (CircleMarker::Live, self.live_point()),
        ]
        .into_iter()
        .map(|(key, point)| Marker::new(key, self.to_screen(point), MARKER_RADIUS))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::compute_transform;

    const VIEW: Size = Size::new(600.0, 600.0);

    fn assert_close(a: Point, b: Point, tol: f64) {
        assert!(
            (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_center_and_radius() {
        let g = map_to_circle_geometry(&StressState::new(80.0, -40.0, 50.0), 0.0, VIEW);
        assert_eq!(g.center, Point::new(20.0, 0.0));
        assert!((g.radius - 78.1025).abs() < 1e-3);
    }

    #[test]
    fn test_reference_point_is_input_state() {
        let state = StressState::new(80.0, -40.0, 50.0);
        let g = map_to_circle_geometry(&state, 0.0, VIEW);
        assert_close(g.reference_point(), Point::new(80.0, 50.0), 1e-9);
        assert!((g.reference_angle - (-50.0f64).atan2(60.0)).abs() < 1e-12);
        // positive shear is below the axis on screen
        assert!(g.to_screen(g.reference_point()).y > g.origin().y);
    }

    #[test]
    fn test_live_point_tracks_transform() {
        let state = StressState::new(-30.0, 70.0, -45.0);
        for theta in [-135.0, -60.0, -10.0, 0.0, 15.0, 45.0, 90.0, 170.0] {
            let g = map_to_circle_geometry(&state, theta, VIEW);
            let t = compute_transform(&state, theta);
            assert_close(g.live_point(), Point::new(t.sigma_x_prime, t.tau_xy_prime), 1e-9);
            assert_close(
                g.conjugate_point(),
                Point::new(t.sigma_y_prime, -t.tau_xy_prime),
                1e-9,
            );
        }
    }

    #[test]
    fn test_live_point_reaches_p1_at_principal_angle() {
        let state = StressState::new(80.0, -40.0, 50.0);
        let p = compute_principal(&state).unwrap();
        let g = map_to_circle_geometry(&state, p.theta_p1, VIEW);
        assert_close(g.live_point(), g.p1(), 1e-9);
        assert_close(g.p1(), Point::new(p.sigma1, 0.0), 1e-9);
        assert_close(g.p2(), Point::new(p.sigma2, 0.0), 1e-9);
    }

    #[test]
    fn test_principal_points_ignore_theta() {
        let state = StressState::new(80.0, -40.0, 50.0);
        let a = map_to_circle_geometry(&state, 0.0, VIEW);
        let b = map_to_circle_geometry(&state, 73.0, VIEW);
        assert_eq!(a.p1(), b.p1());
        assert_eq!(a.p2(), b.p2());
    }

    #[test]
    fn test_rotation_arc_flags() {
        let state = StressState::new(80.0, -40.0, 50.0);
        let small = map_to_circle_geometry(&state, 30.0, VIEW).rotation_arc;
        assert_eq!(small.sweep, SweepDirection::CounterClockwise);
        assert!(!small.large_arc);
        assert!(!small.sweep.svg_flag());

        let negative = map_to_circle_geometry(&state, -30.0, VIEW).rotation_arc;
        assert_eq!(negative.sweep, SweepDirection::Clockwise);
        assert!(negative.sweep.svg_flag());

        let large = map_to_circle_geometry(&state, 120.0, VIEW).rotation_arc;
        assert!(large.large_arc);
        assert!((large.sweep_angle - 240f64.to_radians()).abs() < 1e-12);

        let half = map_to_circle_geometry(&state, 90.0, VIEW).rotation_arc;
        assert!(!half.large_arc);

        let zero = map_to_circle_geometry(&state, 0.0, VIEW).rotation_arc;
        assert_eq!(zero.sweep, SweepDirection::CounterClockwise);
    }

    #[test]
    fn test_rotation_arc_ends_at_live_point() {
        let state = StressState::new(10.0, 50.0, 20.0);
        let g = map_to_circle_geometry(&state, -65.0, VIEW);
        let (start, end) = g.arc_endpoints(&g.rotation_arc, 1.0);
        assert_close(start, g.to_screen(g.reference_point()), 1e-9);
        assert_close(end, g.to_screen(g.live_point()), 1e-9);
    }

    #[test]
    fn test_principal_arc_sweep_follows_shear_sign() {
        // A below the axis (positive shear) turns counterclockwise up to P1
        let below = map_to_circle_geometry(&StressState::new(80.0, -40.0, 50.0), 0.0, VIEW);
        let arc = below.principal_arc.unwrap();
        assert_eq!(arc.sweep, SweepDirection::CounterClockwise);
        assert!(arc.sweep_angle > 0.0);

        let above = map_to_circle_geometry(&StressState::new(80.0, -40.0, -50.0), 0.0, VIEW);
        let arc = above.principal_arc.unwrap();
        assert_eq!(arc.sweep, SweepDirection::Clockwise);
        assert!(arc.sweep_angle < 0.0);

        for g in [below, above] {
            let arc = g.principal_arc.unwrap();
            assert!(!arc.large_arc);
            assert_close(g.point_at(arc.end_angle()), g.p1(), 1e-9);
        }
    }

    #[test]
    fn test_point_circle_for_hydrostatic() {
        let g = map_to_circle_geometry(&StressState::hydrostatic(60.0), 25.0, VIEW);
        assert!(g.is_point_circle());
        assert_eq!(g.radius, 0.0);
        assert_eq!(g.center, Point::new(60.0, 0.0));
        assert_close(g.live_point(), g.center, 1e-12);
        assert!(g.reference_angle.is_finite());
    }

    #[test]
    fn test_negative_zero_diff() {
        let g = map_to_circle_geometry(&StressState::new(-0.0, 0.0, 0.0), 0.0, VIEW);
        assert_eq!(g.reference_angle, 0.0);
    }

    #[test]
    fn test_display_scale_clamped() {
        let small = StressState::new(0.1, 0.0, 0.0);
        assert_eq!(display_scale(&small, VIEW), MAX_DISPLAY_SCALE);
        let huge = StressState::new(1e6, 0.0, 0.0);
        assert_eq!(display_scale(&huge, VIEW), MIN_DISPLAY_SCALE);
        let tiny_view = Size::new(20.0, 20.0);
        assert_eq!(display_scale(&StressState::uniaxial(50.0), tiny_view), MIN_DISPLAY_SCALE);

        let state = StressState::new(80.0, -40.0, 50.0);
        let expected = (300.0 - 40.0) / (80.0 + state.radius() + 10.0);
        assert!((display_scale(&state, VIEW) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tick_step_sequence() {
        assert_eq!(tick_step(0.7), 1.0);
        assert_eq!(tick_step(1.0), 1.0);
        assert_eq!(tick_step(1.3), 2.0);
        assert_eq!(tick_step(3.0), 5.0);
        assert_eq!(tick_step(7.2), 10.0);
        assert_eq!(tick_step(23.0), 50.0);
        assert_eq!(tick_step(1000.0), 1000.0);
        assert!((tick_step(0.013) - 0.02).abs() < 1e-15);
        assert_eq!(tick_step(0.0), 1.0);
        assert_eq!(tick_step(f64::NAN), 1.0);
    }

    #[test]
    fn test_tick_step_never_below_raw() {
        assert_eq!(tick_step(1.0000000000001), 2.0);
        assert_eq!(tick_step(0.1), 0.1);
        for raw in [0.0123, 0.3, 0.999_999_999, 4.9999, 5.0000001, 99.99, 123.4, 7e5] {
            let step = tick_step(raw);
            assert!(step >= raw, "{step} < {raw}");
            assert!(step < raw * 10.0, "{step} too coarse for {raw}");
        }
    }

    #[test]
    fn test_ticks_symmetric() {
        let state = StressState::new(80.0, -40.0, 50.0);
        let g = map_to_circle_geometry(&state, 0.0, VIEW);
        let ticks = &g.ticks;
        assert_eq!(ticks.values.first().copied(), Some(-ticks.max_tick));
        assert_eq!(ticks.values.last().copied(), Some(ticks.max_tick));
        assert!(ticks.max_tick >= state.radius() + state.sigma_avg().abs());
        assert!(ticks.values.windows(2).all(|w| (w[1] - w[0] - ticks.step).abs() < 1e-9));
    }

    #[test]
    fn test_markers_in_screen_space() {
        let g = map_to_circle_geometry(&StressState::new(80.0, -40.0, 50.0), 10.0, VIEW);
        let markers = g.markers();
        assert_eq!(markers.len(), 5);
        let live = markers.iter().find(|m| m.key == CircleMarker::Live).unwrap();
        assert_close(live.center, g.to_screen(g.live_point()), 1e-12);
    }
}
