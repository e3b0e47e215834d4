//! Controller Configuration
//!
//! Set once per actor, validated once, never per tick.

use serde::{Serialize, Deserialize};

use super::error::ControllerError;
use super::raycast::LayerMask;

/// Default inset of ray origins from the actor's edges.
pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;

/// Default steepest climbable slope, in degrees.
pub const DEFAULT_SLOPE_ANGLE_LIMIT: f32 = 45.0;

/// Default number of rays per edge.
pub const DEFAULT_RAY_COUNT: u32 = 4;

/// Default seconds before a platform drop latch clears.
pub const DEFAULT_FALL_THROUGH_DELAY: f32 = 0.3;

/// Configuration for a [`Controller2D`](super::Controller2D).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Inward margin of the ray origins
    pub skin_width: f32,
    /// Steepest surface (degrees from up) treated as walkable
    pub slope_angle_limit: f32,
    /// Rays on each side edge (at least 2)
    pub horizontal_ray_count: u32,
    /// Rays on the top and bottom edges (at least 2)
    pub vertical_ray_count: u32,
    /// Seconds a platform drop stays latched
    pub fall_through_delay: f32,
    /// Layers the rays can hit
    pub collision_mask: LayerMask,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            skin_width: DEFAULT_SKIN_WIDTH,
            slope_angle_limit: DEFAULT_SLOPE_ANGLE_LIMIT,
            horizontal_ray_count: DEFAULT_RAY_COUNT,
            vertical_ray_count: DEFAULT_RAY_COUNT,
            fall_through_delay: DEFAULT_FALL_THROUGH_DELAY,
            collision_mask: LayerMask::ALL,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ControllerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), ControllerError> {
        if !self.skin_width.is_finite() || self.skin_width <= 0.0 {
            return Err(ControllerError::invalid(
                "skin_width",
                format!("must be positive and finite, got {}", self.skin_width),
            ));
        }
        if !(0.0..=90.0).contains(&self.slope_angle_limit) {
            return Err(ControllerError::invalid(
                "slope_angle_limit",
                format!("must be within [0, 90] degrees, got {}", self.slope_angle_limit),
            ));
        }
        if self.horizontal_ray_count < 2 {
            return Err(ControllerError::invalid(
                "horizontal_ray_count",
                format!("must be at least 2, got {}", self.horizontal_ray_count),
            ));
        }
        if self.vertical_ray_count < 2 {
            return Err(ControllerError::invalid(
                "vertical_ray_count",
                format!("must be at least 2, got {}", self.vertical_ray_count),
            ));
        }
        if !self.fall_through_delay.is_finite() || self.fall_through_delay < 0.0 {
            return Err(ControllerError::invalid(
                "fall_through_delay",
                format!("must be non-negative and finite, got {}", self.fall_through_delay),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slope_angle_limit, 45.0);
        assert_eq!(config.fall_through_delay, 0.3);
    }

    #[test]
    fn test_ray_count_below_two_rejected() {
        let config = ControllerConfig {
            horizontal_ray_count: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ControllerError::InvalidConfiguration { field: "horizontal_ray_count", .. })
        ));

        let config = ControllerConfig {
            vertical_ray_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ControllerError::InvalidConfiguration { field: "vertical_ray_count", .. })
        ));
    }

    #[test]
    fn test_bad_skin_and_angles_rejected() {
        for skin in [0.0, -0.1, f32::NAN] {
            let config = ControllerConfig { skin_width: skin, ..Default::default() };
            assert!(config.validate().is_err());
        }

        let config = ControllerConfig { slope_angle_limit: 95.0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ControllerConfig { fall_through_delay: -1.0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json() {
        let config = ControllerConfig::from_json_str(
            r#"{ "skin_width": 0.1, "horizontal_ray_count": 6, "collision_mask": 5 }"#,
        )
        .unwrap();
        assert_eq!(config.skin_width, 0.1);
        assert_eq!(config.horizontal_ray_count, 6);
        assert_eq!(config.vertical_ray_count, DEFAULT_RAY_COUNT);
        assert!(config.collision_mask.contains(0));
        assert!(config.collision_mask.contains(2));
        assert!(!config.collision_mask.contains(1));

        let invalid = ControllerConfig::from_json_str(r#"{ "vertical_ray_count": 1 }"#);
        assert!(matches!(invalid, Err(ControllerError::InvalidConfiguration { .. })));

        let garbage = ControllerConfig::from_json_str("not json");
        assert!(matches!(garbage, Err(ControllerError::Parse(_))));
    }
}
