//! Pure scene builders: computed geometry in, drawing primitives out.

use crate::primitives::{Palette, Primitive, PrimitiveStyle, TextAnchor};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use mohrview_core::circle::{ArcDescriptor, CircleGeometry, CircleMarker};
use mohrview_core::curve::CurveSample;
use mohrview_core::interaction::order_for_hover;
use mohrview_core::stress::TransformedState;
use mohrview_core::viewport::ViewportState;

/// Angle indicator arcs sit at this fraction of the circle radius.
pub const ARC_INDICATOR_FRACTION: f64 = 0.3;
/// Dot radius of a circle marker.
pub const MARKER_DOT_RADIUS: f64 = 5.0;
const TICK_LENGTH: f64 = 4.0;
const LABEL_SIZE: f64 = 12.0;

/// An ordered list of primitives; later entries paint on top.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Apply the user's zoom/pan to every primitive.
    pub fn with_viewport(self, viewport: &ViewportState, surface: Size) -> Scene {
        let affine = viewport.transform(surface);
        Scene {
            primitives: self
                .primitives
                .iter()
                .map(|p| p.transformed(affine, viewport.zoom))
                .collect(),
        }
    }

    fn line(&mut self, from: Point, to: Point, style: PrimitiveStyle) {
        self.push(Primitive::Line { from, to, style });
    }

    fn text(
        &mut self,
        position: Point,
        text: impl Into<String>,
        color: peniko::Color,
        anchor: TextAnchor,
    ) {
        self.push(Primitive::Text {
            position,
            text: text.into(),
            size: LABEL_SIZE,
            color,
            anchor,
        });
    }
}

/// Per-frame options for the scene builders.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneContext {
    pub palette: Palette,
    /// Circle marker under the pointer, painted last and highlighted.
    pub hovered: Option<CircleMarker>,
}

impl SceneContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_hovered(mut self, hovered: Option<CircleMarker>) -> Self {
        self.hovered = hovered;
        self
    }
}

fn marker_label(marker: CircleMarker) -> &'static str {
    match marker {
        CircleMarker::Reference => "A",
        CircleMarker::Live => "x'",
        CircleMarker::Conjugate => "y'",
        CircleMarker::Principal1 => "σ1",
        CircleMarker::Principal2 => "σ2",
    }
}

fn format_stress(value: f64) -> String {
    // Avoid printing "-0.0".
    let value = if value.abs() < 0.05 { 0.0 } else { value };
    format!("{value:.1}")
}

/// Mohr's circle construction in fitted surface coordinates.
///
/// Apply [`Scene::with_viewport`] afterwards for the user's zoom and pan.
pub fn build_circle_scene(geometry: &CircleGeometry, ctx: &SceneContext) -> Scene {
    let palette = &ctx.palette;
    let mut scene = Scene::new();
    let origin = geometry.origin();
    let size = geometry.viewport;

    // Axes through the stress origin; shear is positive downward.
    let axis = PrimitiveStyle::stroke(palette.axis, 1.0);
    scene.line(Point::new(0.0, origin.y), Point::new(size.width, origin.y), axis);
    scene.line(Point::new(origin.x, 0.0), Point::new(origin.x, size.height), axis);
    let sigma_label = Point::new(size.width - 6.0, origin.y - 6.0);
    scene.text(sigma_label, "σ", palette.axis, TextAnchor::End);
    let tau_label = Point::new(origin.x + 6.0, size.height - 6.0);
    scene.text(tau_label, "τ", palette.axis, TextAnchor::Start);

    let tick_style = PrimitiveStyle::stroke(palette.grid, 1.0);
    for &value in &geometry.ticks.values {
        let at = geometry.to_screen(Point::new(value, 0.0));
        let half = Vec2::new(0.0, TICK_LENGTH);
        scene.line(at - half, at + half, tick_style);
        if value != 0.0 {
            scene.text(
                at + Vec2::new(0.0, 16.0),
                format_stress(value),
                palette.reference,
                TextAnchor::Middle,
            );
        }
    }

    let center = geometry.to_screen(geometry.center);
    if geometry.is_point_circle() {
        scene.push(Primitive::Circle {
            center,
            radius: MARKER_DOT_RADIUS,
            style: PrimitiveStyle::fill(palette.circle),
        });
        scene.text(
            center + Vec2::new(8.0, -8.0),
            format_stress(geometry.center.x),
            palette.text,
            TextAnchor::Start,
        );
        return scene;
    }

    scene.push(Primitive::Circle {
        center,
        radius: geometry.screen_radius(),
        style: PrimitiveStyle::stroke(palette.circle, 2.0),
    });
    scene.push(Primitive::Circle {
        center,
        radius: 3.0,
        style: PrimitiveStyle::fill(palette.axis),
    });

    // Diameters: the unrotated element and the rotated one.
    let reference = geometry.to_screen(geometry.reference_point());
    let reference_conjugate =
        geometry.to_screen(geometry.point_at(geometry.reference_angle + std::f64::consts::PI));
    let reference_style = PrimitiveStyle::stroke(palette.reference, 1.0).dashed();
    scene.line(reference, reference_conjugate, reference_style);
    let live = geometry.to_screen(geometry.live_point());
    let conjugate = geometry.to_screen(geometry.conjugate_point());
    scene.line(live, conjugate, PrimitiveStyle::stroke(palette.rotation, 1.5));

    if let Some(arc) = &geometry.principal_arc {
        push_indicator_arc(
            &mut scene,
            geometry,
            arc,
            ARC_INDICATOR_FRACTION,
            palette.principal,
            "2θp",
        );
    }
    if geometry.rotation_arc.sweep_angle != 0.0 {
        push_indicator_arc(
            &mut scene,
            geometry,
            &geometry.rotation_arc,
            ARC_INDICATOR_FRACTION * 1.5,
            palette.rotation,
            "2θ",
        );
    }

    let markers = order_for_hover(geometry.markers(), ctx.hovered.as_ref(), |m| &m.key);
    for marker in markers {
        let hovered = ctx.hovered == Some(marker.key);
        let color = if hovered {
            palette.hover
        } else {
            match marker.key {
                CircleMarker::Principal1 | CircleMarker::Principal2 => palette.principal,
                CircleMarker::Live | CircleMarker::Conjugate => palette.rotation,
                CircleMarker::Reference => palette.reference,
            }
        };
        scene.push(Primitive::Circle {
            center: marker.center,
            radius: if hovered { MARKER_DOT_RADIUS + 2.0 } else { MARKER_DOT_RADIUS },
            style: PrimitiveStyle::fill(color),
        });
        let label_at = marker.center + Vec2::new(8.0, -8.0);
        scene.text(label_at, marker_label(marker.key), color, TextAnchor::Start);
        if hovered {
            let offset = marker.center - geometry.origin();
            let value = Point::new(offset.x / geometry.scale, offset.y / geometry.scale);
            scene.text(
                marker.center + Vec2::new(8.0, 20.0),
                format!("({}, {})", format_stress(value.x), format_stress(value.y)),
                palette.text,
                TextAnchor::Start,
            );
        }
    }

    scene
}

fn push_indicator_arc(
    scene: &mut Scene,
    geometry: &CircleGeometry,
    arc: &ArcDescriptor,
    fraction: f64,
    color: peniko::Color,
    label: &str,
) {
    let (from, to) = geometry.arc_endpoints(arc, fraction);
    scene.push(Primitive::Arc {
        from,
        to,
        radius: geometry.screen_radius() * fraction,
        large_arc: arc.large_arc,
        sweep: arc.sweep.svg_flag(),
        style: PrimitiveStyle::stroke(color, 1.5),
    });
    let mid = ArcDescriptor {
        sweep_angle: arc.sweep_angle / 2.0,
        ..*arc
    };
    let (_, label_at) = geometry.arc_endpoints(&mid, fraction + 0.12);
    scene.text(label_at, label, color, TextAnchor::Middle);
}

/// Angle-domain curves of `σx'(θ)` and `τxy'(θ)` inside `plot`, with principal
/// markers at the shear zero crossings and a cursor at `theta`.
pub fn build_curve_scene(
    sample: &CurveSample,
    plot: Rect,
    theta: f64,
    ctx: &SceneContext,
) -> Scene {
    let palette = &ctx.palette;
    let mut scene = Scene::new();
    let range = sample.axis_range();

    let frame = PrimitiveStyle::stroke(palette.axis, 1.0);
    scene.line(Point::new(plot.x0, plot.y0), Point::new(plot.x0, plot.y1), frame);
    scene.line(Point::new(plot.x0, plot.y1), Point::new(plot.x1, plot.y1), frame);
    if range.min <= 0.0 && range.max >= 0.0 {
        let y = range.to_screen_y(plot, 0.0);
        let zero_style = PrimitiveStyle::stroke(palette.grid, 1.0);
        scene.line(Point::new(plot.x0, y), Point::new(plot.x1, y), zero_style);
    }
    let min_label = format!("{:.0}°", sample.theta_min());
    scene.text(Point::new(plot.x0, plot.y1 + 16.0), min_label, palette.axis, TextAnchor::Start);
    let max_label = format!("{:.0}°", sample.theta_max());
    scene.text(Point::new(plot.x1, plot.y1 + 16.0), max_label, palette.axis, TextAnchor::End);

    let (sigma, tau) = sample.to_screen(plot);
    scene.push(Primitive::Polyline {
        points: sigma,
        style: PrimitiveStyle::stroke(palette.sigma, 2.0),
    });
    scene.push(Primitive::Polyline {
        points: tau,
        style: PrimitiveStyle::stroke(palette.tau, 2.0),
    });

    for crossing in sample.zero_crossings() {
        let at = sample.screen_point(plot, range, crossing.theta, crossing.sigma);
        scene.push(Primitive::Circle {
            center: at,
            radius: MARKER_DOT_RADIUS,
            style: PrimitiveStyle::fill(palette.principal),
        });
        scene.text(
            at + Vec2::new(0.0, -10.0),
            format!("θp = {:.1}°", crossing.theta),
            palette.principal,
            TextAnchor::Middle,
        );
    }

    if theta >= sample.theta_min() && theta <= sample.theta_max() {
        let top = sample.screen_point(plot, range, theta, range.max);
        let bottom = sample.screen_point(plot, range, theta, range.min);
        scene.line(top, bottom, PrimitiveStyle::stroke(palette.rotation, 1.0).dashed());
    }

    scene
}

/// The stress element rotated by `theta`, with normal and shear arrows on the
/// x' and y' faces.
pub fn build_element_scene(
    transformed: &TransformedState,
    theta: f64,
    center: Point,
    half_size: f64,
    ctx: &SceneContext,
) -> Scene {
    let palette = &ctx.palette;
    let mut scene = Scene::new();
    // Counterclockwise on screen is a negative rotation in y-down space.
    let rotation = Affine::rotate_about(-theta.to_radians(), center);
    let corner = |x: f64, y: f64| rotation * (center + Vec2::new(x, y));

    let h = half_size;
    scene.push(Primitive::Polyline {
        points: vec![corner(-h, -h), corner(h, -h), corner(h, h), corner(-h, h), corner(-h, -h)],
        style: PrimitiveStyle::stroke(palette.axis, 2.0).with_fill(palette.background),
    });

    let arrow = h * 0.8;
    let faces = [
        (Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0), transformed.sigma_x_prime, "σx'"),
        (Vec2::new(0.0, -1.0), Vec2::new(-1.0, 0.0), transformed.sigma_y_prime, "σy'"),
    ];
    for (normal, along, sigma, label) in faces {
        let face = center + normal * h;
        let tip = face + normal * arrow * sigma.signum();
        let (from, to) = if sigma >= 0.0 { (face, tip) } else { (tip, face) };
        scene.line(rotation * from, rotation * to, PrimitiveStyle::stroke(palette.sigma, 2.0));
        scene.text(
            rotation * (face + normal * (arrow + 14.0)),
            format!("{label} = {}", format_stress(sigma)),
            palette.sigma,
            TextAnchor::Middle,
        );

        // Positive shear acts along +y' on the x' face and +x' on the y' face.
        let shear_dir = along * transformed.tau_xy_prime.signum();
        let shear_from = face + normal * 6.0 - shear_dir * (h * 0.5);
        let shear_to = face + normal * 6.0 + shear_dir * (h * 0.5);
        if transformed.tau_xy_prime != 0.0 {
            let shear_style = PrimitiveStyle::stroke(palette.tau, 2.0);
            scene.line(rotation * shear_from, rotation * shear_to, shear_style);
        }
    }

    scene.text(
        center + Vec2::new(0.0, h * 2.2),
        format!("θ = {:.1}°  τx'y' = {}", theta, format_stress(transformed.tau_xy_prime)),
        palette.text,
        TextAnchor::Middle,
    );

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use mohrview_core::circle::map_to_circle_geometry;
    use mohrview_core::curve::sample_curve;
    use mohrview_core::stress::{StressState, compute_transform};

    const VIEW: Size = Size::new(600.0, 600.0);

    fn arcs(scene: &Scene) -> Vec<(bool, bool)> {
        scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Arc { large_arc, sweep, .. } => Some((*large_arc, *sweep)),
                _ => None,
            })
            .collect()
    }

    fn marker_dots(scene: &Scene) -> Vec<Point> {
        scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Circle { center, radius, .. } if *radius >= MARKER_DOT_RADIUS => {
                    Some(*center)
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_circle_scene_arcs() {
        let state = StressState::new(80.0, -40.0, 50.0);
        let geometry = map_to_circle_geometry(&state, 30.0, VIEW);
        let scene = build_circle_scene(&geometry, &SceneContext::new());
        // principal arc then rotation arc, both counterclockwise on screen
        assert_eq!(arcs(&scene), vec![(false, false), (false, false)]);

        let geometry = map_to_circle_geometry(&state, -120.0, VIEW);
        let scene = build_circle_scene(&geometry, &SceneContext::new());
        assert_eq!(arcs(&scene), vec![(false, false), (true, true)]);
    }

    #[test]
    fn test_no_rotation_arc_at_zero() {
        let geometry = map_to_circle_geometry(&StressState::new(80.0, -40.0, 50.0), 0.0, VIEW);
        let scene = build_circle_scene(&geometry, &SceneContext::new());
        assert_eq!(arcs(&scene).len(), 1);
    }

    #[test]
    fn test_hovered_marker_painted_last() {
        let geometry = map_to_circle_geometry(&StressState::new(80.0, -40.0, 50.0), 20.0, VIEW);
        let ctx = SceneContext::new().with_hovered(Some(CircleMarker::Principal1));
        let scene = build_circle_scene(&geometry, &ctx);
        let dots = marker_dots(&scene);
        let p1 = geometry.to_screen(geometry.p1());
        assert_eq!(dots.last().copied(), Some(p1));
    }

    #[test]
    fn test_point_circle_scene() {
        let geometry = map_to_circle_geometry(&StressState::hydrostatic(60.0), 10.0, VIEW);
        let scene = build_circle_scene(&geometry, &SceneContext::new());
        assert!(arcs(&scene).is_empty());
        assert_eq!(marker_dots(&scene), vec![geometry.to_screen(Point::new(60.0, 0.0))]);
    }

    #[test]
    fn test_viewport_applied() {
        let geometry = map_to_circle_geometry(&StressState::uniaxial(100.0), 0.0, VIEW);
        let scene = build_circle_scene(&geometry, &SceneContext::new());
        let mut viewport = ViewportState::new();
        viewport.zoom = 1.0;
        viewport.pan = Vec2::new(15.0, -5.0);
        let moved = scene.clone().with_viewport(&viewport, VIEW);
        assert_eq!(moved.len(), scene.len());
        match (&scene.primitives()[0], &moved.primitives()[0]) {
            (Primitive::Line { from: a, .. }, Primitive::Line { from: b, .. }) => {
                assert!((*b - *a - Vec2::new(15.0, -5.0)).hypot() < 1e-9);
            }
            _ => panic!("first primitive should be the stress axis"),
        }
    }

    #[test]
    fn test_curve_scene_markers() {
        let state = StressState::new(80.0, -40.0, 50.0);
        let sample = sample_curve(&state, 0.0, 180.0, 360).unwrap();
        let plot = Rect::new(40.0, 20.0, 640.0, 320.0);
        let scene = build_curve_scene(&sample, plot, 45.0, &SceneContext::new());
        let polylines = scene.primitives().iter().filter(|p| p.kind() == "polyline").count();
        assert_eq!(polylines, 2);
        assert_eq!(marker_dots(&scene).len(), 2);
    }

    #[test]
    fn test_element_scene_tension_points_outward() {
        let state = StressState::new(80.0, -40.0, 0.0);
        let t = compute_transform(&state, 0.0);
        let center = Point::new(100.0, 100.0);
        let scene = build_element_scene(&t, 0.0, center, 40.0, &SceneContext::new());
        let first_arrow = scene.primitives().iter().find_map(|p| match p {
            Primitive::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        });
        let (from, to) = first_arrow.unwrap();
        assert!((from.x - 140.0).abs() < 1e-9);
        assert!(to.x > from.x);
        // no shear arrows for a zero-shear state
        let lines = scene.primitives().iter().filter(|p| p.kind() == "line").count();
        assert_eq!(lines, 2);
    }
}
