//! Plane-stress transformation and principal-stress formulas.

use crate::EPSILON;
use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};

/// A 2D plane-stress state.
///
/// Any real triple is valid; there is no structural invariant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StressState {
    /// Normal stress on the x face.
    pub sigma_x: f64,
    /// Normal stress on the y face.
    pub sigma_y: f64,
    /// In-plane shear stress.
    pub tau_xy: f64,
}

impl StressState {
    /// Create a new stress state.
    pub const fn new(sigma_x: f64, sigma_y: f64, tau_xy: f64) -> Self {
        Self {
            sigma_x,
            sigma_y,
            tau_xy,
        }
    }

    /// Uniaxial tension along x.
    pub const fn uniaxial(sigma: f64) -> Self {
        Self::new(sigma, 0.0, 0.0)
    }

    /// Pure shear.
    pub const fn pure_shear(tau: f64) -> Self {
        Self::new(0.0, 0.0, tau)
    }

    /// Biaxial normal stresses without shear.
    pub const fn biaxial(sigma_x: f64, sigma_y: f64) -> Self {
        Self::new(sigma_x, sigma_y, 0.0)
    }

    /// Equal normal stresses in every direction.
    pub const fn hydrostatic(sigma: f64) -> Self {
        Self::new(sigma, sigma, 0.0)
    }

    /// Named presets offered by the UI, in display order.
    pub fn presets() -> [(&'static str, StressState); 5] {
        [
            ("Uniaxial", Self::uniaxial(100.0)),
            ("Pure shear", Self::pure_shear(60.0)),
            ("Biaxial", Self::biaxial(80.0, -40.0)),
            ("Hydrostatic", Self::hydrostatic(60.0)),
            ("Combined", Self::new(80.0, -40.0, 50.0)),
        ]
    }

    /// Average normal stress, the Mohr's circle center.
    pub fn sigma_avg(&self) -> f64 {
        (self.sigma_x + self.sigma_y) / 2.0
    }

    /// Half the normal-stress difference.
    pub fn half_diff(&self) -> f64 {
        (self.sigma_x - self.sigma_y) / 2.0
    }

    /// Mohr's circle radius, equal to the maximum in-plane shear.
    pub fn radius(&self) -> f64 {
        self.half_diff().hypot(self.tau_xy)
    }

    /// Largest absolute component, used to size the circle view.
    pub fn max_abs_component(&self) -> f64 {
        self.sigma_x
            .abs()
            .max(self.sigma_y.abs())
            .max(self.tau_xy.abs())
    }

    /// Whether the state has no unique principal orientation.
    pub fn is_hydrostatic(&self) -> bool {
        self.half_diff().abs() < EPSILON && self.tau_xy.abs() < EPSILON
    }
}

/// Stresses on a face rotated by some angle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformedState {
    pub sigma_x_prime: f64,
    pub sigma_y_prime: f64,
    pub tau_xy_prime: f64,
}

/// Principal stresses and orientations of a non-hydrostatic state.
///
/// `sigma1 >= sigma2` and `tau_max = (sigma1 - sigma2) / 2` always hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalSolution {
    pub sigma1: f64,
    pub sigma2: f64,
    /// Orientation of the `sigma1` face in degrees, in (-90, 90].
    pub theta_p1: f64,
    /// `theta_p1 + 90`.
    pub theta_p2: f64,
    pub tau_max: f64,
    pub sigma_avg: f64,
}

/// Normalize an angle in degrees into `[0, 180)`.
pub fn normalize_half_turn(angle_deg: f64) -> f64 {
    let normalized = angle_deg.rem_euclid(180.0);
    // rem_euclid rounds tiny negative inputs up to exactly 180.
    if normalized >= 180.0 { 0.0 } else { normalized }
}

/// Stresses on the face rotated counterclockwise by `theta_deg`.
pub fn compute_transform(state: &StressState, theta_deg: f64) -> TransformedState {
    let avg = state.sigma_avg();
    let diff = state.half_diff();
    let (sin2, cos2) = (2.0 * theta_deg.to_radians()).sin_cos();

    let rotated = diff * cos2 + state.tau_xy * sin2;
    TransformedState {
        sigma_x_prime: avg + rotated,
        sigma_y_prime: avg - rotated,
        tau_xy_prime: -diff * sin2 + state.tau_xy * cos2,
    }
}

/// Principal stresses, principal angles and maximum shear.
///
/// Hydrostatic states return [`GeometryError::DegenerateGeometry`] because
/// `atan2(0, 0)` is not an orientation.
pub fn compute_principal(state: &StressState) -> GeometryResult<PrincipalSolution> {
    let avg = state.sigma_avg();
    if state.is_hydrostatic() {
        log::debug!("Hydrostatic state at {avg}: no principal orientation");
        return Err(GeometryError::DegenerateGeometry { sigma_avg: avg });
    }

    let diff = state.half_diff();
    let radius = state.radius();
    let theta_p1 = 0.5 * state.tau_xy.atan2(diff).to_degrees();

    Ok(PrincipalSolution {
        sigma1: avg + radius,
        sigma2: avg - radius,
        theta_p1,
        theta_p2: theta_p1 + 90.0,
        tau_max: radius,
        sigma_avg: avg,
    })
}

/// Both principal angles for display, normalized into `[0, 180)` with the
/// smaller one first.
///
/// Uses the `tan 2θp = 2τxy / (σx − σy)` form. Returns `None` for hydrostatic
/// states, with the same guard as [`compute_principal`].
pub fn principal_angles_display(state: &StressState) -> Option<(f64, f64)> {
    if state.is_hydrostatic() {
        return None;
    }
    let angle = 0.5
        * (2.0 * state.tau_xy)
            .atan2(state.sigma_x - state.sigma_y)
            .to_degrees();
    let first = normalize_half_turn(angle);
    let second = normalize_half_turn(angle + 90.0);
    Some((first.min(second), first.max(second)))
}

/// Orientation in `[0, 180)` of the face carrying the positive maximum shear.
///
/// Sits 45° clockwise of the `sigma1` face.
pub fn max_shear_angle(state: &StressState) -> GeometryResult<f64> {
    let principal = compute_principal(state)?;
    Ok(normalize_half_turn(principal.theta_p1 - 45.0))
}
