//! Engine-wide tuning values.
//!
//! `gravity`, `max_fall_speed` and `friction` are required: a resource that
//! omits any of them fails to parse instead of running with made-up numbers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PhysicsError};

/// Tuning constants are authored against a nominal 60 steps per second.
pub const NOMINAL_STEPS_PER_SECOND: f64 = 60.0;

/// Upper bound for a single `update` dt (seconds).
pub const DEFAULT_MAX_DT: f64 = 0.033;

/// Horizontal speed below which friction snaps `vel.x` to zero.
pub const DEFAULT_FRICTION_EPSILON: f64 = 0.1;

fn default_speed_multiplier() -> f64 {
    1.0
}

fn default_max_dt() -> f64 {
    DEFAULT_MAX_DT
}

fn default_friction_epsilon() -> f64 {
    DEFAULT_FRICTION_EPSILON
}

fn default_max_events() -> usize {
    1024
}

/// Engine-wide physics configuration, consumed once at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Downward acceleration in units per nominal tick squared.
    pub gravity: f64,
    /// Default terminal fall speed (units per nominal tick).
    pub max_fall_speed: f64,
    /// Default per-nominal-tick horizontal damping for grounded bodies, in `[0, 1]`.
    pub friction: f64,
    /// Global time scale applied to gravity and motion.
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f64,
    /// Clamp for the dt passed to a single `update`.
    #[serde(default = "default_max_dt")]
    pub max_dt: f64,
    #[serde(default = "default_friction_epsilon")]
    pub friction_epsilon: f64,
    /// Also report pairs that stop overlapping (off by default: enter-only).
    #[serde(default)]
    pub exit_notifications: bool,
    /// Capacity of the undrained event buffer; extra events are dropped.
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

impl PhysicsConfig {
    pub fn new(gravity: f64, max_fall_speed: f64, friction: f64) -> Self {
        Self {
            gravity,
            max_fall_speed,
            friction,
            speed_multiplier: default_speed_multiplier(),
            max_dt: DEFAULT_MAX_DT,
            friction_epsilon: DEFAULT_FRICTION_EPSILON,
            exit_notifications: false,
            max_events: default_max_events(),
        }
    }

    pub fn with_exit_notifications(mut self, enabled: bool) -> Self {
        self.exit_notifications = enabled;
        self
    }

    pub fn with_speed_multiplier(mut self, multiplier: f64) -> Self {
        self.speed_multiplier = multiplier;
        self
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let fields = [
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("friction", self.friction),
            ("speed_multiplier", self.speed_multiplier),
            ("max_dt", self.max_dt),
            ("friction_epsilon", self.friction_epsilon),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidConfig { field, value });
            }
        }
        if self.friction > 1.0 {
            return Err(PhysicsError::InvalidConfig { field: "friction", value: self.friction });
        }
        if self.max_dt == 0.0 {
            return Err(PhysicsError::InvalidConfig { field: "max_dt", value: self.max_dt });
        }
        Ok(())
    }

    pub fn from_ron_str(src: &str) -> Result<Self, PhysicsError> {
        let cfg: Self = ron::from_str(src).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, PhysicsError> {
        let cfg: Self = toml::from_str(src).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.ron` or `.toml` file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, PhysicsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Self::from_ron_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ron_optional_fields_default() {
        let cfg = PhysicsConfig::from_ron_str("(gravity: 0.5, max_fall_speed: 12.0, friction: 0.8)").unwrap();
        assert_eq!(cfg.gravity, 0.5);
        assert_eq!(cfg.speed_multiplier, 1.0);
        assert_eq!(cfg.max_dt, DEFAULT_MAX_DT);
        assert!(!cfg.exit_notifications);
    }

    #[test]
    fn test_toml_round_trip_fields() {
        let src = "gravity = 0.4\nmax_fall_speed = 10.0\nfriction = 0.75\nexit_notifications = true\n";
        let cfg = PhysicsConfig::from_toml_str(src).unwrap();
        assert_eq!(cfg.friction, 0.75);
        assert!(cfg.exit_notifications);
    }

    #[test]
    fn test_missing_gravity_is_fatal() {
        let err = PhysicsConfig::from_ron_str("(max_fall_speed: 12.0, friction: 0.8)").unwrap_err();
        assert!(matches!(err, PhysicsError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let err = PhysicsConfig::new(-1.0, 12.0, 0.8).validate().unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidConfig { field: "gravity", .. }));
        let err = PhysicsConfig::new(0.5, f64::NAN, 0.8).validate().unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidConfig { field: "max_fall_speed", .. }));
        let err = PhysicsConfig::new(0.5, 12.0, 1.5).validate().unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidConfig { field: "friction", .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("tilephys_cfg_test.json");
        std::fs::write(&path, "{}").unwrap();
        let err = PhysicsConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, PhysicsError::Config(ConfigError::UnsupportedFormat(_))));
        let _ = std::fs::remove_file(&path);
    }
}
