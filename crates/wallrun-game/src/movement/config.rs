//! Movement and sensor tuning

use serde::{Deserialize, Serialize};
use wallrun_core::error::{ensure_non_negative, ensure_not_empty, ensure_positive, ensure_range};
use wallrun_core::ConfigError;

/// Movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Ground speed when a run starts (m/s)
    pub min_speed: f32,
    /// Ground speed cap (m/s)
    pub max_speed: f32,
    /// Ground speed gained per second while running
    pub acceleration: f32,

    /// Air-control speed after leaving the ground
    pub min_air_movement_speed: f32,
    /// Air-control speed cap
    pub max_air_movement_speed: f32,
    /// Air-control speed gained per second
    pub air_acceleration: f32,
    /// Scale applied to raw intent before it becomes air intent
    pub air_movement_factor: f32,
    /// How strongly air intent bends the inherited trajectory
    pub air_movement_scaling: f32,

    /// Facing interpolation rate (per second)
    pub rotation_speed: f32,
    /// Turns sharper than this (degrees) snap instead of interpolating
    pub snap_angle: f32,

    /// Jump power at minimum speed
    pub jump_power: f32,
    /// Extra jump power per m/s above minimum speed
    pub jump_scaling: f32,
    /// Gravity acceleration (m/s^2)
    pub gravity: f32,
    /// Multiplier on gravity and jump impulse
    pub gravity_scaling: f32,

    /// Wall-run speed lost per second
    pub wall_run_deceleration: f32,
    /// Gravity applied while wall-running, before `gravity_scaling`
    pub wall_run_gravity: f32,
    /// Wall-run ends when speed decays to this
    pub min_wall_run_speed: f32,
    /// Multiplier on wall-run displacement
    pub initial_wall_run_boost: f32,
    /// Angle (degrees) the wall-run direction leans into the wall
    pub angle_to_wall: f32,
    /// Extra angle (degrees) away from the wall when jumping off
    pub jump_off_angle: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            min_speed: 10.0,
            max_speed: 20.0,
            acceleration: 5.0,
            min_air_movement_speed: 0.0,
            max_air_movement_speed: 0.4,
            air_acceleration: 0.2,
            air_movement_factor: 0.005,
            air_movement_scaling: 0.05,
            rotation_speed: 10.0,
            snap_angle: 95.0,
            jump_power: 4.0,
            jump_scaling: 0.25,
            gravity: 9.8,
            gravity_scaling: 3.0,
            wall_run_deceleration: 5.0,
            wall_run_gravity: 0.5,
            min_wall_run_speed: 5.0,
            initial_wall_run_boost: 1.5,
            angle_to_wall: 30.0,
            jump_off_angle: 20.0,
        }
    }
}

impl MovementConfig {
    /// Reject tunings that would make a ramp run backwards or never finish
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("min_speed", self.min_speed)?;
        ensure_range("min_speed", self.min_speed, "max_speed", self.max_speed)?;
        ensure_non_negative("acceleration", self.acceleration)?;

        ensure_non_negative("min_air_movement_speed", self.min_air_movement_speed)?;
        ensure_range(
            "min_air_movement_speed",
            self.min_air_movement_speed,
            "max_air_movement_speed",
            self.max_air_movement_speed,
        )?;
        ensure_non_negative("air_acceleration", self.air_acceleration)?;
        ensure_non_negative("air_movement_factor", self.air_movement_factor)?;
        ensure_non_negative("air_movement_scaling", self.air_movement_scaling)?;

        ensure_positive("rotation_speed", self.rotation_speed)?;
        ensure_positive("snap_angle", self.snap_angle)?;
        ensure_range("snap_angle", self.snap_angle, "max_snap_angle", 180.0)?;

        ensure_non_negative("jump_power", self.jump_power)?;
        ensure_non_negative("jump_scaling", self.jump_scaling)?;
        ensure_positive("gravity", self.gravity)?;
        ensure_positive("gravity_scaling", self.gravity_scaling)?;

        // A zero deceleration would let a wall-run last forever
        ensure_positive("wall_run_deceleration", self.wall_run_deceleration)?;
        ensure_non_negative("wall_run_gravity", self.wall_run_gravity)?;
        ensure_non_negative("min_wall_run_speed", self.min_wall_run_speed)?;
        ensure_positive("initial_wall_run_boost", self.initial_wall_run_boost)?;
        ensure_non_negative("angle_to_wall", self.angle_to_wall)?;
        ensure_non_negative("jump_off_angle", self.jump_off_angle)?;
        Ok(())
    }

    /// Jump power for a given ground speed; faster runs jump higher
    pub fn jump_power_at(&self, speed: f32) -> f32 {
        self.jump_power + self.jump_scaling * (speed - self.min_speed)
    }

    /// Upward velocity produced by a jump of the given power
    pub fn jump_velocity(&self, power: f32) -> f32 {
        (power.max(0.0) * self.gravity_scaling * self.gravity).sqrt()
    }

    /// Downward acceleration for the current mode
    pub fn effective_gravity(&self, wall_running: bool) -> f32 {
        let base = if wall_running {
            self.wall_run_gravity
        } else {
            self.gravity
        };
        base * self.gravity_scaling
    }
}

/// Ground probe and volume tag configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Tag a surface must carry to count as ground
    pub ground_tag: String,
    /// Tag of trigger volumes that start a wall-run
    pub wall_run_tag: String,
    /// How far below the feet the ground probe reaches (m)
    pub probe_distance: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ground_tag: "Ground".to_string(),
            wall_run_tag: "Wallrun".to_string(),
            probe_distance: 0.1,
        }
    }
}

impl SensorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_not_empty("ground_tag", &self.ground_tag)?;
        ensure_not_empty("wall_run_tag", &self.wall_run_tag)?;
        ensure_positive("probe_distance", self.probe_distance)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MovementConfig::default().validate().is_ok());
        assert!(SensorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let config = MovementConfig {
            min_speed: 20.0,
            max_speed: 10.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedRange {
                max_field: "max_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let config = MovementConfig {
            air_acceleration: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "air_acceleration",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_missing_ground_tag_rejected() {
        let config = SensorConfig {
            ground_tag: String::new(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Empty { field: "ground_tag" })
        );
    }

    #[test]
    fn test_jump_power_scales_with_speed() {
        let config = MovementConfig {
            min_speed: 10.0,
            max_speed: 20.0,
            jump_power: 4.0,
            jump_scaling: 0.25,
            ..Default::default()
        };
        assert_eq!(config.jump_power_at(10.0), 4.0);
        assert_eq!(config.jump_power_at(20.0), 6.5);
        assert!(
            config.jump_velocity(config.jump_power_at(20.0))
                > config.jump_velocity(config.jump_power_at(10.0))
        );
    }
}
