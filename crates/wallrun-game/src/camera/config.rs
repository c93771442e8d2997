//! Camera configuration

use serde::{Deserialize, Serialize};
use wallrun_core::error::{ensure_non_negative, ensure_positive, ensure_range};
use wallrun_core::ConfigError;

/// Orbit camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Closest the camera may zoom in
    pub min_distance: f32,
    /// Farthest the camera may zoom out
    pub max_distance: f32,
    /// Distance at spawn
    pub default_distance: f32,
    /// Zoom speed (scroll sensitivity)
    pub zoom_speed: f32,
    /// Zoom interpolation smoothing (0-1, lower = smoother)
    pub zoom_smoothing: f32,
    /// Mouse sensitivity (radians per pixel)
    pub sensitivity: f32,
    /// Minimum pitch angle in degrees
    pub pitch_min: f32,
    /// Maximum pitch angle in degrees
    pub pitch_max: f32,
    /// Gap kept between the camera and geometry it is pulled in by
    pub collision_radius: f32,
    /// Height of the look-at point above the character's feet
    pub target_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: 1.5,
            max_distance: 12.0,
            default_distance: 6.0,
            zoom_speed: 1.0,
            zoom_smoothing: 0.15,
            sensitivity: 0.003,
            pitch_min: -60.0,
            pitch_max: 75.0,
            collision_radius: 0.3,
            target_height: 1.6,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("min_distance", self.min_distance)?;
        ensure_range("min_distance", self.min_distance, "max_distance", self.max_distance)?;
        ensure_range(
            "min_distance",
            self.min_distance,
            "default_distance",
            self.default_distance,
        )?;
        ensure_range(
            "default_distance",
            self.default_distance,
            "max_distance",
            self.max_distance,
        )?;
        ensure_positive("zoom_smoothing", self.zoom_smoothing)?;
        ensure_positive("sensitivity", self.sensitivity)?;
        ensure_range("pitch_min", self.pitch_min, "pitch_max", self.pitch_max)?;
        ensure_non_negative("collision_radius", self.collision_radius)?;
        Ok(())
    }
}
