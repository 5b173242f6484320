//! Angle-domain curve sampling and principal-marker detection.

use crate::EPSILON;
use crate::error::{GeometryError, GeometryResult};
use crate::stress::{StressState, compute_transform};
use kurbo::{Point, Rect};

/// Default number of sampling intervals.
pub const DEFAULT_STEPS: usize = 500;

/// Fractional margin added to each side of the auto-scaled axis.
pub const AXIS_MARGIN: f64 = 0.12;

/// One sampled angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub theta: f64,
    pub sigma: f64,
    pub tau: f64,
}

/// Sampled `sigma_x'(θ)` and `tau_xy'(θ)` on one ascending angle grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSample {
    points: Vec<CurvePoint>,
}

/// Interpolated location where the shear curve changes sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroCrossing {
    pub theta: f64,
    /// Normal stress at the same interpolation fraction.
    pub sigma: f64,
}

/// Vertical plot range shared by the sigma and tau curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Sample the transformation over `[theta_min, theta_max]` with `steps + 1`
/// evenly spaced angles, both endpoints included.
pub fn sample_curve(
    state: &StressState,
    theta_min: f64,
    theta_max: f64,
    steps: usize,
) -> GeometryResult<CurveSample> {
    // Written as a negation so NaN bounds are rejected too.
    if !(theta_min < theta_max) || !theta_min.is_finite() || !theta_max.is_finite() || steps == 0 {
        log::debug!("Rejecting sample range [{theta_min}, {theta_max}] with {steps} steps");
        return Err(GeometryError::InvalidRange {
            theta_min,
            theta_max,
            steps,
        });
    }

    let points = (0..=steps)
        .map(|i| {
            // Weighted form so the span never overflows. The last angle is
            // pinned so rounding never leaves the range.
            let theta = if i == steps {
                theta_max
            } else {
                let t = i as f64 / steps as f64;
                theta_min * (1.0 - t) + theta_max * t
            };
            let t = compute_transform(state, theta);
            CurvePoint {
                theta,
                sigma: t.sigma_x_prime,
                tau: t.tau_xy_prime,
            }
        })
        .collect();

    Ok(CurveSample { points })
}

/// Every place where adjacent tau samples change sign.
///
/// A crossing that lands exactly on a sample is reported once, not once per
/// neighbouring pair. No sign change yields an empty list.
pub fn find_zero_crossings(points: &[CurvePoint]) -> Vec<ZeroCrossing> {
    let mut crossings: Vec<ZeroCrossing> = Vec::new();
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.tau * b.tau > 0.0 || (a.tau - b.tau).abs() <= EPSILON {
            continue;
        }
        let fraction = a.tau / (a.tau - b.tau);
        let crossing = ZeroCrossing {
            theta: a.theta + fraction * (b.theta - a.theta),
            sigma: a.sigma + fraction * (b.sigma - a.sigma),
        };
        let duplicate = crossings
            .last()
            .is_some_and(|last| (last.theta - crossing.theta).abs() <= EPSILON);
        if !duplicate {
            crossings.push(crossing);
        }
    }
    crossings
}

impl CurveSample {
    /// Sampled points in ascending angle order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn theta_min(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.theta)
    }

    pub fn theta_max(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.theta)
    }

    /// Angle between consecutive samples.
    pub fn step(&self) -> f64 {
        let intervals = self.points.len().saturating_sub(1).max(1) as f64;
        self.theta_max() / intervals - self.theta_min() / intervals
    }

    /// Principal markers: where the shear curve crosses zero.
    pub fn zero_crossings(&self) -> Vec<ZeroCrossing> {
        find_zero_crossings(&self.points)
    }

    /// Auto-scaled vertical range covering both curves.
    ///
    /// The union of the extrema is padded by [`AXIS_MARGIN`] per side. A flat
    /// curve gets a unit range around its value so later divisions stay finite.
    pub fn axis_range(&self) -> AxisRange {
        let (lo, hi) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.sigma).min(p.tau), hi.max(p.sigma).max(p.tau))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return AxisRange { min: -0.5, max: 0.5 };
        }

        let pad = (hi - lo) * AXIS_MARGIN;
        let (min, max) = (lo - pad, hi + pad);
        if max - min < EPSILON {
            let mid = (min + max) / 2.0;
            return AxisRange {
                min: mid - 0.5,
                max: mid + 0.5,
            };
        }
        AxisRange { min, max }
    }

    /// Map the sigma and tau curves into polylines inside `plot`.
    ///
    /// Angle grows to the right and stress grows upward.
    pub fn to_screen(&self, plot: Rect) -> (Vec<Point>, Vec<Point>) {
        let range = self.axis_range();
        let sigma = self
            .points
            .iter()
            .map(|p| self.screen_point(plot, range, p.theta, p.sigma))
            .collect();
        let tau = self
            .points
            .iter()
            .map(|p| self.screen_point(plot, range, p.theta, p.tau))
            .collect();
        (sigma, tau)
    }

    /// Screen position of `(theta, value)` inside `plot`.
    pub fn screen_point(&self, plot: Rect, range: AxisRange, theta: f64, value: f64) -> Point {
        let span = (self.theta_max() - self.theta_min()).max(EPSILON);
        let x = plot.x0 + (theta - self.theta_min()) / span * plot.width();
        Point::new(x, range.to_screen_y(plot, value))
    }
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Vertical pixel position of `value` inside `plot`.
    pub fn to_screen_y(&self, plot: Rect, value: f64) -> f64 {
        plot.y1 - (value - self.min) / self.span() * plot.height()
    }
}
