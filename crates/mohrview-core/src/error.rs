//! Error types for geometry and sampling operations.

use thiserror::Error;

/// Errors reported by the transformation engine and the curve sampler.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Hydrostatic state: equal normal stresses and no shear, so no principal
    /// orientation exists.
    #[error("Degenerate geometry: hydrostatic state at {sigma_avg} has no principal orientation")]
    DegenerateGeometry { sigma_avg: f64 },
    /// Sampling range with `theta_min >= theta_max` or zero steps.
    #[error("Invalid range: [{theta_min}, {theta_max}] with {steps} steps")]
    InvalidRange {
        theta_min: f64,
        theta_max: f64,
        steps: usize,
    },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
