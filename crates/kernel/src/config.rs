use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a movement configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunables for player movement. Distances are world units (meters),
/// times are seconds.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Vertical acceleration, negative pulls down.
    pub gravity: f32,
    /// Upward velocity set by a jump.
    pub jump_strength: f32,
    /// Horizontal speed.
    pub speed: f32,
    /// Height of the body center when standing on the floor.
    pub ground_level: f32,
    /// Half-size of the square floor centered on the origin. `None` means
    /// the floor extends forever.
    pub floor_half_extent: Option<f32>,
    /// Half-extents of the player's bounding box.
    pub body_half_extents: Vec3,
    /// Below this height the body is considered lost and respawns.
    pub void_threshold: f32,
    pub respawn_point: Vec3,
    /// Radians per unit of mouse motion.
    pub mouse_sensitivity: f32,
    /// Camera mount point relative to the body center.
    pub eye_offset: Vec3,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: -35.0,
            jump_strength: 25.0,
            speed: 25.0,
            ground_level: 2.0,
            floor_half_extent: None,
            body_half_extents: Vec3::new(0.5, 2.0, 0.5),
            void_threshold: -50.0,
            respawn_point: Vec3::new(0.0, 10.0, 10.0),
            mouse_sensitivity: 0.002,
            eye_offset: Vec3::new(0.0, 1.5, 0.0),
        }
    }
}

impl MovementConfig {
    /// Reject values the integrator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("gravity", self.gravity),
            ("jump_strength", self.jump_strength),
            ("speed", self.speed),
            ("ground_level", self.ground_level),
            ("void_threshold", self.void_threshold),
            ("mouse_sensitivity", self.mouse_sensitivity),
        ];
        for (field, v) in scalars {
            if !v.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }
        let vectors = [
            ("body_half_extents", self.body_half_extents),
            ("respawn_point", self.respawn_point),
            ("eye_offset", self.eye_offset),
        ];
        for (field, v) in vectors {
            if !v.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }
        if self.speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "speed",
                reason: "must not be negative",
            });
        }
        if self.jump_strength < 0.0 {
            return Err(ConfigError::Invalid {
                field: "jump_strength",
                reason: "must not be negative",
            });
        }
        if self.mouse_sensitivity < 0.0 {
            return Err(ConfigError::Invalid {
                field: "mouse_sensitivity",
                reason: "must not be negative",
            });
        }
        if self.body_half_extents.min_element() <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "body_half_extents",
                reason: "must be positive on every axis",
            });
        }
        if let Some(e) = self.floor_half_extent {
            if !e.is_finite() || e <= 0.0 {
                return Err(ConfigError::Invalid {
                    field: "floor_half_extent",
                    reason: "must be positive and finite",
                });
            }
        }
        if self.void_threshold >= self.ground_level {
            return Err(ConfigError::Invalid {
                field: "void_threshold",
                reason: "must be below ground_level",
            });
        }
        if self.respawn_point.y <= self.void_threshold {
            return Err(ConfigError::Invalid {
                field: "respawn_point",
                reason: "must be above void_threshold",
            });
        }
        Ok(())
    }

    /// Parse and validate a YAML config.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded movement config");
        Ok(config)
    }

    /// Whether the floor exists under the given horizontal position.
    pub fn floor_covers(&self, position: Vec3) -> bool {
        match self.floor_half_extent {
            None => true,
            Some(e) => position.x.abs() <= e && position.z.abs() <= e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = MovementConfig::default();
        assert_eq!(c.gravity, -35.0);
        assert_eq!(c.jump_strength, 25.0);
        assert_eq!(c.speed, 25.0);
        assert_eq!(c.ground_level, 2.0);
        assert_eq!(c.body_half_extents, Vec3::new(0.5, 2.0, 0.5));
        assert_eq!(c.void_threshold, -50.0);
        assert_eq!(c.respawn_point, Vec3::new(0.0, 10.0, 10.0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let c = MovementConfig::from_yaml_str("speed: 10.0\nfloor_half_extent: 50.0\n").unwrap();
        assert_eq!(c.speed, 10.0);
        assert_eq!(c.floor_half_extent, Some(50.0));
        assert_eq!(c.gravity, -35.0);
    }

    #[test]
    fn vector_fields_parse_from_yaml_sequences() {
        let c = MovementConfig::from_yaml_str("respawn_point: [1.0, 20.0, -3.0]\n").unwrap();
        assert_eq!(c.respawn_point, Vec3::new(1.0, 20.0, -3.0));
    }

    #[test]
    fn negative_speed_is_rejected() {
        let err = MovementConfig::from_yaml_str("speed: -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "speed", .. }));
    }

    #[test]
    fn flat_body_is_rejected() {
        let c = MovementConfig {
            body_half_extents: Vec3::new(0.5, 0.0, 0.5),
            ..MovementConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid {
                field: "body_half_extents",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_gravity_is_rejected() {
        let c = MovementConfig {
            gravity: f32::NAN,
            ..MovementConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn void_above_ground_is_rejected() {
        let c = MovementConfig {
            void_threshold: 5.0,
            ..MovementConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn respawn_inside_the_void_is_rejected() {
        let err = MovementConfig::from_yaml_str("respawn_point: [0.0, -80.0, 0.0]\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "respawn_point",
                ..
            }
        ));
        let edge = MovementConfig {
            respawn_point: Vec3::new(0.0, -50.0, 0.0),
            ..MovementConfig::default()
        };
        assert!(edge.validate().is_err());
        let just_above = MovementConfig {
            respawn_point: Vec3::new(0.0, -49.0, 0.0),
            ..MovementConfig::default()
        };
        assert!(just_above.validate().is_ok());
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = MovementConfig::from_yaml_str("speed: [fast").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn floor_covers_respects_extent() {
        let infinite = MovementConfig::default();
        assert!(infinite.floor_covers(Vec3::new(1e6, 0.0, -1e6)));

        let finite = MovementConfig {
            floor_half_extent: Some(10.0),
            ..MovementConfig::default()
        };
        assert!(finite.floor_covers(Vec3::new(10.0, 0.0, -10.0)));
        assert!(!finite.floor_covers(Vec3::new(10.5, 0.0, 0.0)));
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "gravity: -9.8").unwrap();
        let c = MovementConfig::load(f.path()).unwrap();
        assert!((c.gravity - -9.8).abs() < 1e-6);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = MovementConfig::load("/nonexistent/voxwalk.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
