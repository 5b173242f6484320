//! Tunable visualizer constants.
//!
//! Defaults reproduce the stock behavior; hosts may load overrides from JSON.

use crate::curve::DEFAULT_STEPS;
use crate::interaction::ROTATE_DEGREES_PER_PIXEL;
use crate::smoothing::{ANGLE_SPEED, STRESS_SPEED};
use crate::viewport::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ViewportState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Visualizer settings shared by the smoothers, sampler and controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Per-frame smoothing fraction for stress components.
    pub stress_speed: f64,
    /// Per-frame smoothing fraction for the rotation angle.
    pub angle_speed: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom restored by a view reset.
    pub default_zoom: f64,
    pub rotate_degrees_per_pixel: f64,
    /// Rotation range reachable by dragging, and the curve's sampled range.
    pub theta_min: f64,
    pub theta_max: f64,
    /// Sampling intervals for the curve view.
    pub curve_steps: usize,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            stress_speed: STRESS_SPEED,
            angle_speed: ANGLE_SPEED,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            default_zoom: DEFAULT_ZOOM,
            rotate_degrees_per_pixel: ROTATE_DEGREES_PER_PIXEL,
            theta_min: 0.0,
            theta_max: 180.0,
            curve_steps: DEFAULT_STEPS,
        }
    }
}

impl VisualizerConfig {
    /// Parse and validate a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate()?;
        config.clamp_default_zoom();
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break smoothing or sampling.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, speed) in [
            ("stress_speed", self.stress_speed),
            ("angle_speed", self.angle_speed),
        ] {
            if !(speed > 0.0 && speed <= 1.0) {
                return Err(invalid(field, format!("{speed} is outside (0, 1]")));
            }
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(invalid(
                "min_zoom",
                format!(
                    "{} must be positive and at most max_zoom {}",
                    self.min_zoom, self.max_zoom
                ),
            ));
        }
        if !(self.theta_min < self.theta_max) {
            return Err(invalid(
                "theta_min",
                format!("{} must be below theta_max {}", self.theta_min, self.theta_max),
            ));
        }
        if self.curve_steps == 0 {
            return Err(invalid("curve_steps", "must be at least 1".to_string()));
        }
        if !self.rotate_degrees_per_pixel.is_finite() {
            return Err(invalid("rotate_degrees_per_pixel", "must be finite".to_string()));
        }
        Ok(())
    }

    fn clamp_default_zoom(&mut self) {
        let clamped = self.default_zoom.clamp(self.min_zoom, self.max_zoom);
        if clamped != self.default_zoom {
            log::warn!(
                "default_zoom {} outside [{}, {}], using {}",
                self.default_zoom,
                self.min_zoom,
                self.max_zoom,
                clamped
            );
            self.default_zoom = clamped;
        }
    }

    /// Fresh viewport honoring the configured zoom limits.
    pub fn viewport(&self) -> ViewportState {
        ViewportState {
            zoom: self.default_zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            default_zoom: self.default_zoom,
            ..ViewportState::default()
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.stress_speed, 0.12);
        assert_eq!(config.angle_speed, 0.14);
        assert_eq!(config.default_zoom, 1.6);
        assert_eq!(config.curve_steps, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = VisualizerConfig::from_json(r#"{ "angle_speed": 0.2 }"#).unwrap();
        assert_eq!(config.angle_speed, 0.2);
        assert_eq!(config.stress_speed, 0.12);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = VisualizerConfig {
            theta_min: -90.0,
            theta_max: 90.0,
            ..VisualizerConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(VisualizerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            VisualizerConfig::from_json(r#"{ "stress_speed": 1.5 }"#),
            Err(ConfigError::Invalid { field: "stress_speed", .. })
        ));
        assert!(matches!(
            VisualizerConfig::from_json(r#"{ "theta_min": 10, "theta_max": 10 }"#),
            Err(ConfigError::Invalid { field: "theta_min", .. })
        ));
        assert!(matches!(
            VisualizerConfig::from_json(r#"{ "curve_steps": 0 }"#),
            Err(ConfigError::Invalid { field: "curve_steps", .. })
        ));
        assert!(matches!(
            VisualizerConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_default_zoom_clamped() {
        let config = VisualizerConfig::from_json(r#"{ "default_zoom": 20 }"#).unwrap();
        assert_eq!(config.default_zoom, 8.0);
        assert_eq!(config.viewport().zoom, 8.0);
    }
}
