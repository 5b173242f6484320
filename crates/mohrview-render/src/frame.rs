//! Cooperative frame scheduling for the two animated views.
//!
//! The host owns the real frame primitive (a display link, a winit redraw
//! request, a browser animation frame) and exposes it through
//! [`FrameScheduler`]. A [`FrameLoop`] holds at most one pending request and
//! cancels it before scheduling again, so a surface swap or range change never
//! leaves two callbacks racing.

use kurbo::Size;
use mohrview_core::circle::{CircleGeometry, map_to_circle_geometry};
use mohrview_core::config::VisualizerConfig;
use mohrview_core::curve::{CurveSample, sample_curve};
use mohrview_core::error::GeometryResult;
use mohrview_core::smoothing::Smoothed;
use mohrview_core::stress::{StressState, TransformedState, compute_transform};

/// Relative distance below which an animated stress state stops requesting
/// frames. The displayed value keeps converging on later ticks.
const STRESS_IDLE_TOLERANCE: f64 = 1e-9;

/// Opaque id of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-provided frame primitive.
pub trait FrameScheduler {
    /// Schedule one callback for the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a callback that has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Something advanced once per frame.
pub trait Animation {
    /// Advance one frame; returns `true` while more frames are needed.
    fn tick(&mut self) -> bool;
}

/// Identity of what a loop is drawing into. A change restarts the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopKey {
    pub surface_id: u64,
    pub theta_min: f64,
    pub theta_max: f64,
}

/// One animation plus its single pending frame.
#[derive(Debug)]
pub struct FrameLoop<A> {
    animation: A,
    pending: Option<FrameHandle>,
    key: Option<LoopKey>,
}

impl<A: Animation> FrameLoop<A> {
    pub fn new(animation: A) -> Self {
        Self {
            animation,
            pending: None,
            key: None,
        }
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Mutable access for setting targets. Call [`FrameLoop::wake`] afterwards.
    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }

    pub fn key(&self) -> Option<LoopKey> {
        self.key
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel any pending frame, adopt `key` and schedule afresh.
    pub fn restart(&mut self, key: LoopKey, scheduler: &mut impl FrameScheduler) {
        self.cancel(scheduler);
        self.key = Some(key);
        self.pending = Some(scheduler.request_frame());
        log::debug!("frame loop restarted for {key:?}");
    }

    /// Make sure a frame is coming for `key`, restarting if the key changed.
    pub fn wake(&mut self, key: LoopKey, scheduler: &mut impl FrameScheduler) {
        if self.key != Some(key) {
            self.restart(key, scheduler);
        } else if self.pending.is_none() {
            self.pending = Some(scheduler.request_frame());
        }
    }

    /// Run the callback for `handle`.
    ///
    /// Returns `true` if the animation advanced and another frame was
    /// scheduled. Handles other than the pending one are stale and ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut impl FrameScheduler) -> bool {
        if self.pending != Some(handle) {
            log::trace!("ignoring stale frame {handle:?}");
            return false;
        }
        self.pending = None;
        let more = self.animation.tick();
        if more {
            self.pending = Some(scheduler.request_frame());
        }
        more
    }

    /// Cancel the pending frame, if any.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
        self.cancel(scheduler);
    }

    fn cancel(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }
}

fn stress_settled(smoothed: &Smoothed<StressState>) -> bool {
    let d = smoothed.displayed;
    let t = smoothed.target;
    [(d.sigma_x, t.sigma_x), (d.sigma_y, t.sigma_y), (d.tau_xy, t.tau_xy)]
        .into_iter()
        .all(|(d, t)| (t - d).abs() < STRESS_IDLE_TOLERANCE * t.abs().max(1.0))
}

/// Stress state and rotation angle behind the orientation diagram and circle.
#[derive(Debug, Clone)]
pub struct DiagramAnimation {
    pub stress: Smoothed<StressState>,
    pub theta: Smoothed<f64>,
    stress_speed: f64,
    angle_speed: f64,
}

impl DiagramAnimation {
    pub fn new(state: StressState, theta: f64, config: &VisualizerConfig) -> Self {
        Self {
            stress: Smoothed::new(state),
            theta: Smoothed::new(theta),
            stress_speed: config.stress_speed,
            angle_speed: config.angle_speed,
        }
    }

    pub fn set_stress_target(&mut self, state: StressState) {
        self.stress.set_target(state);
    }

    pub fn set_theta_target(&mut self, theta: f64) {
        self.theta.set_target(theta);
    }

    /// Transformation at the displayed state and angle.
    pub fn transformed(&self) -> TransformedState {
        compute_transform(&self.stress.displayed, self.theta.displayed)
    }

    /// Circle construction at the displayed state and angle.
    pub fn geometry(&self, viewport: Size) -> CircleGeometry {
        map_to_circle_geometry(&self.stress.displayed, self.theta.displayed, viewport)
    }

    pub fn is_idle(&self) -> bool {
        self.theta.is_settled() && stress_settled(&self.stress)
    }
}

impl Animation for DiagramAnimation {
    fn tick(&mut self) -> bool {
        self.stress.tick_at(self.stress_speed);
        let arrived = self.theta.tick_angle_at(self.angle_speed);
        log::trace!(
            "diagram tick: theta {:.4} -> {:.4}",
            self.theta.displayed,
            self.theta.target
        );
        !(arrived && stress_settled(&self.stress))
    }
}

/// Stress state and angle cursor of the curve view.
///
/// The curves are sampled from the displayed stress, so they ease in step with
/// the circle view.
#[derive(Debug, Clone)]
pub struct CurveAnimation {
    pub stress: Smoothed<StressState>,
    pub theta: Smoothed<f64>,
    theta_min: f64,
    theta_max: f64,
    steps: usize,
    stress_speed: f64,
    angle_speed: f64,
}

impl CurveAnimation {
    pub fn new(state: StressState, theta: f64, config: &VisualizerConfig) -> Self {
        Self {
            stress: Smoothed::new(state),
            theta: Smoothed::new(theta),
            theta_min: config.theta_min,
            theta_max: config.theta_max,
            steps: config.curve_steps,
            stress_speed: config.stress_speed,
            angle_speed: config.angle_speed,
        }
    }

    pub fn set_stress_target(&mut self, state: StressState) {
        self.stress.set_target(state);
    }

    pub fn set_theta_target(&mut self, theta: f64) {
        self.theta.set_target(theta);
    }

    /// Change the sampled angle range; the owning loop should be restarted.
    pub fn set_range(&mut self, theta_min: f64, theta_max: f64) {
        self.theta_min = theta_min;
        self.theta_max = theta_max;
    }

    pub fn key(&self, surface_id: u64) -> LoopKey {
        LoopKey {
            surface_id,
            theta_min: self.theta_min,
            theta_max: self.theta_max,
        }
    }

    /// Curves at the displayed stress state.
    pub fn sample(&self) -> GeometryResult<CurveSample> {
        sample_curve(&self.stress.displayed, self.theta_min, self.theta_max, self.steps)
    }

    pub fn is_idle(&self) -> bool {
        self.theta.is_settled() && stress_settled(&self.stress)
    }
}

impl Animation for CurveAnimation {
    fn tick(&mut self) -> bool {
        self.stress.tick_at(self.stress_speed);
        let arrived = self.theta.tick_angle_at(self.angle_speed);
        log::trace!("curve tick: theta {:.4}", self.theta.displayed);
        !(arrived && stress_settled(&self.stress))
    }
}
