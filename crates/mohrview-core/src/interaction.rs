//! Pointer gestures: pan/zoom on the circle view, drag-to-rotate on the
//! orientation diagram, and marker hover.
//!
//! The controller is the only writer of [`ViewportState`]. Rotation drags
//! never touch displayed values; they report a new target for the caller to
//! hand to its smoother.

use crate::config::VisualizerConfig;
use crate::input::{MouseButton, PointerEvent, wheel_notches};
use crate::viewport::ViewportState;
use kurbo::{Point, Size, Vec2};

/// Default degrees of rotation per horizontal pixel dragged.
pub const ROTATE_DEGREES_PER_PIXEL: f64 = 0.5;
/// Extra screen pixels around a marker that still count as a hover.
pub const HOVER_TOLERANCE_PX: f64 = 3.0;

/// Which surface an event arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Circle,
    Orientation,
}

/// A hoverable marker in fitted (unzoomed) surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker<K> {
    pub key: K,
    pub center: Point,
    pub radius: f64,
}

impl<K> Marker<K> {
    pub fn new(key: K, center: Point, radius: f64) -> Self {
        Self {
            key,
            center,
            radius,
        }
    }
}

/// What an event changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome<K> {
    None,
    ViewportChanged,
    /// New rotation target in degrees.
    RotationTarget(f64),
    HoverChanged(Option<K>),
}

/// Stable reorder that moves the hovered item to the end so it paints last.
///
/// All other items keep their relative order; without a hover, or when the
/// key is absent, the list is returned unchanged.
pub fn order_for_hover<T, K: PartialEq>(
    mut items: Vec<T>,
    hovered: Option<&K>,
    key: impl Fn(&T) -> &K,
) -> Vec<T> {
    let Some(hovered) = hovered else {
        return items;
    };
    if let Some(index) = items.iter().position(|item| key(item) == hovered) {
        let item = items.remove(index);
        items.push(item);
    }
    items
}

#[derive(Debug, Clone, Copy)]
struct PanDrag {
    pointer_start: Point,
    pan_origin: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct RotateDrag {
    pointer_start_x: f64,
    theta_origin: f64,
}

/// Routes pointer events to viewport, rotation and hover state.
#[derive(Debug, Clone)]
pub struct InteractionController<K> {
    viewport: ViewportState,
    circle_surface: Size,
    pan_drag: Option<PanDrag>,
    rotate_drag: Option<RotateDrag>,
    hovered: Option<K>,
    rotate_degrees_per_pixel: f64,
    rotate_min: f64,
    rotate_max: f64,
}

impl<K: Copy + PartialEq> InteractionController<K> {
    pub fn new(circle_surface: Size) -> Self {
        Self::from_config(&VisualizerConfig::default(), circle_surface)
    }

    pub fn from_config(config: &VisualizerConfig, circle_surface: Size) -> Self {
        Self {
            viewport: config.viewport(),
            circle_surface,
            pan_drag: None,
            rotate_drag: None,
            hovered: None,
            rotate_degrees_per_pixel: config.rotate_degrees_per_pixel,
            rotate_min: config.theta_min,
            rotate_max: config.theta_max,
        }
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn hovered(&self) -> Option<K> {
        self.hovered
    }

    pub fn is_panning(&self) -> bool {
        self.pan_drag.is_some()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotate_drag.is_some()
    }

    /// The circle surface was resized or replaced; abandons any pan drag.
    pub fn set_circle_surface(&mut self, size: Size) {
        self.circle_surface = size;
        self.pan_drag = None;
    }

    pub fn zoom_in(&mut self) -> InteractionOutcome<K> {
        self.viewport.zoom_in();
        InteractionOutcome::ViewportChanged
    }

    pub fn zoom_out(&mut self) -> InteractionOutcome<K> {
        self.viewport.zoom_out();
        InteractionOutcome::ViewportChanged
    }

    pub fn reset_view(&mut self) -> InteractionOutcome<K> {
        self.viewport.reset();
        self.pan_drag = None;
        InteractionOutcome::ViewportChanged
    }

    /// Dispatch an event by surface.
    ///
    /// `markers` are the circle markers for hover resolution; `rotation_target`
    /// is the current target angle a rotate drag starts from.
    pub fn handle_pointer_event(
        &mut self,
        surface: Surface,
        event: PointerEvent,
        markers: &[Marker<K>],
        rotation_target: f64,
    ) -> InteractionOutcome<K> {
        match surface {
            Surface::Circle => self.handle_circle_event(event, markers),
            Surface::Orientation => self.handle_orientation_event(event, rotation_target),
        }
    }

    /// Pan with the left button, zoom with the wheel, hover otherwise.
    pub fn handle_circle_event(
        &mut self,
        event: PointerEvent,
        markers: &[Marker<K>],
    ) -> InteractionOutcome<K> {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                self.pan_drag = Some(PanDrag {
                    pointer_start: position,
                    pan_origin: self.viewport.pan,
                });
                InteractionOutcome::None
            }
            PointerEvent::Move { position } => match self.pan_drag {
                Some(drag) => {
                    self.viewport.pan = drag.pan_origin + (position - drag.pointer_start);
                    InteractionOutcome::ViewportChanged
                }
                None => self.update_hover(self.hit_test(position, markers)),
            },
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => match self.pan_drag.take() {
                Some(drag) => {
                    self.viewport.pan = drag.pan_origin + (position - drag.pointer_start);
                    InteractionOutcome::ViewportChanged
                }
                None => InteractionOutcome::None,
            },
            PointerEvent::Scroll { delta, .. } => match wheel_notches(delta) {
                0 => InteractionOutcome::None,
                notches => {
                    self.viewport.zoom_wheel(notches);
                    InteractionOutcome::ViewportChanged
                }
            },
            PointerEvent::Leave => {
                self.pan_drag = None;
                self.update_hover(None)
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => InteractionOutcome::None,
        }
    }

    /// Horizontal drag sets the rotation target.
    pub fn handle_orientation_event(
        &mut self,
        event: PointerEvent,
        rotation_target: f64,
    ) -> InteractionOutcome<K> {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                self.rotate_drag = Some(RotateDrag {
                    pointer_start_x: position.x,
                    theta_origin: rotation_target,
                });
                InteractionOutcome::None
            }
            PointerEvent::Move { position } => match self.rotate_drag {
                Some(drag) => InteractionOutcome::RotationTarget(self.rotation_for(drag, position)),
                None => InteractionOutcome::None,
            },
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => match self.rotate_drag.take() {
                Some(drag) => InteractionOutcome::RotationTarget(self.rotation_for(drag, position)),
                None => InteractionOutcome::None,
            },
            PointerEvent::Leave => {
                self.rotate_drag = None;
                InteractionOutcome::None
            }
            _ => InteractionOutcome::None,
        }
    }

    fn rotation_for(&self, drag: RotateDrag, position: Point) -> f64 {
        let delta = (position.x - drag.pointer_start_x) * self.rotate_degrees_per_pixel;
        (drag.theta_origin + delta).clamp(self.rotate_min, self.rotate_max)
    }

    /// Marker under a screen position, preferring the current hover and then
    /// the topmost (last painted) marker.
    pub fn hit_test(&self, screen_point: Point, markers: &[Marker<K>]) -> Option<K> {
        let view_point = self.viewport.screen_to_view(self.circle_surface, screen_point);
        let zoom = self.viewport.zoom;
        let is_hit = |marker: &Marker<K>| {
            (marker.center - view_point).hypot() * zoom <= marker.radius + HOVER_TOLERANCE_PX
        };

        if let Some(current) = self.hovered {
            if markers.iter().any(|m| m.key == current && is_hit(m)) {
                return Some(current);
            }
        }
        markers.iter().rev().find(|m| is_hit(m)).map(|m| m.key)
    }

    fn update_hover(&mut self, hovered: Option<K>) -> InteractionOutcome<K> {
        if self.hovered == hovered {
            return InteractionOutcome::None;
        }
        self.hovered = hovered;
        InteractionOutcome::HoverChanged(hovered)
    }
}
