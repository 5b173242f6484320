//! Exponential smoothing of displayed values toward their targets.
//!
//! The controller writes targets; each frame the displayed value moves a
//! fixed fraction of the remaining distance. Superseded targets are simply
//! replaced, never queued.

use crate::stress::StressState;

/// Per-frame fraction for stress components.
pub const STRESS_SPEED: f64 = 0.12;
/// Per-frame fraction for the rotation angle.
pub const ANGLE_SPEED: f64 = 0.14;
/// Distance in degrees below which the angle snaps to its target.
pub const ANGLE_ARRIVAL_THRESHOLD: f64 = 0.01;

/// Values that can move part of the way toward another value.
pub trait Interpolate: Copy {
    /// Per-frame fraction used when no override is configured.
    const SPEED: f64;

    /// `self + (target - self) * t`, component-wise.
    fn lerp(self, target: Self, t: f64) -> Self;
}

/// A bare scalar is the rotation angle.
impl Interpolate for f64 {
    const SPEED: f64 = ANGLE_SPEED;

    fn lerp(self, target: Self, t: f64) -> Self {
        self + (target - self) * t
    }
}

impl Interpolate for StressState {
    const SPEED: f64 = STRESS_SPEED;

    fn lerp(self, target: Self, t: f64) -> Self {
        StressState {
            sigma_x: self.sigma_x.lerp(target.sigma_x, t),
            sigma_y: self.sigma_y.lerp(target.sigma_y, t),
            tau_xy: self.tau_xy.lerp(target.tau_xy, t),
        }
    }
}

/// One smoothing tick at the quantity's own speed.
pub fn advance<T: Interpolate>(displayed: T, target: T) -> T {
    advance_at(displayed, target, T::SPEED)
}

/// One smoothing tick at a configured speed.
pub fn advance_at<T: Interpolate>(displayed: T, target: T, speed: f64) -> T {
    displayed.lerp(target, speed)
}

/// Result of one angle tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleStep {
    pub value: f64,
    /// The value snapped onto the target this tick.
    pub arrived: bool,
}

/// One angle tick at [`ANGLE_SPEED`], snapping once within
/// [`ANGLE_ARRIVAL_THRESHOLD`].
pub fn advance_angle(displayed: f64, target: f64) -> AngleStep {
    advance_angle_at(displayed, target, ANGLE_SPEED)
}

pub fn advance_angle_at(displayed: f64, target: f64, speed: f64) -> AngleStep {
    if (target - displayed).abs() < ANGLE_ARRIVAL_THRESHOLD {
        return AngleStep {
            value: target,
            arrived: true,
        };
    }
    AngleStep {
        value: advance_at(displayed, target, speed),
        arrived: false,
    }
}

/// A displayed value chasing a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed<T> {
    pub displayed: T,
    pub target: T,
}

impl<T: Interpolate> Smoothed<T> {
    /// Start at rest on `value`.
    pub fn new(value: T) -> Self {
        Self {
            displayed: value,
            target: value,
        }
    }

    /// Replace the target; the next tick heads for it.
    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Jump straight to `value` without animating.
    pub fn reset(&mut self, value: T) {
        self.displayed = value;
        self.target = value;
    }

    pub fn tick(&mut self) -> T {
        self.tick_at(T::SPEED)
    }

    pub fn tick_at(&mut self, speed: f64) -> T {
        self.displayed = advance_at(self.displayed, self.target, speed);
        self.displayed
    }
}

impl Smoothed<f64> {
    /// Tick an angle; returns `true` once it has settled on the target.
    pub fn tick_angle(&mut self) -> bool {
        self.tick_angle_at(ANGLE_SPEED)
    }

    pub fn tick_angle_at(&mut self, speed: f64) -> bool {
        let step = advance_angle_at(self.displayed, self.target, speed);
        self.displayed = step.value;
        step.arrived
    }

    pub fn is_settled(&self) -> bool {
        self.displayed == self.target
    }
}
