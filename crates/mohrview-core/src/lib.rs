//! MohrView Core Library
//!
//! Platform-agnostic stress transformation math, Mohr's circle geometry,
//! curve sampling and the animation/viewport state machines that drive the
//! MohrView visualizer. Nothing here paints; renderers consume the geometry.

pub mod circle;
pub mod config;
pub mod curve;
pub mod error;
pub mod input;
pub mod interaction;
pub mod smoothing;
pub mod stress;
pub mod viewport;

pub use circle::{
    ArcDescriptor, CircleGeometry, CircleMarker, SweepDirection, TickSet, map_to_circle_geometry,
};
pub use config::{ConfigError, VisualizerConfig};
pub use curve::{
    AxisRange, CurvePoint, CurveSample, ZeroCrossing, find_zero_crossings, sample_curve,
};
pub use error::{GeometryError, GeometryResult};
pub use input::{MouseButton, PointerEvent};
pub use interaction::{InteractionController, InteractionOutcome, Marker, Surface, order_for_hover};
pub use smoothing::{
    AngleStep, Interpolate, Smoothed, advance, advance_angle, advance_angle_at, advance_at,
};
pub use stress::{
    PrincipalSolution, StressState, TransformedState, compute_principal, compute_transform,
    max_shear_angle, principal_angles_display,
};
pub use viewport::ViewportState;

/// Tolerance shared by every near-zero comparison in the engine.
///
/// Both principal-angle formulas and the zero-crossing search use this value
/// so the curve view and the circle view agree on degeneracy.
pub const EPSILON: f64 = 1e-9;
