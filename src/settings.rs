//! Runner settings with persistence
//!
//! Settings are read from a path given on the command line, else from
//! `~/.config/wallrun/settings.toml`, else the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wallrun_core::TimeConfig;
use wallrun_game::{CameraConfig, CharacterConfig};

/// All runner settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub player: CharacterConfig,
    pub camera: CameraConfig,
    pub time: TimeConfig,
    pub scenario: ScenarioSettings,
}

/// Headless run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    /// Simulated seconds
    pub duration: f32,
    /// Render frames per simulated second
    pub frame_rate: f32,
    /// Write a per-tick JSON trace here
    pub trace_path: Option<PathBuf>,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            duration: 6.0,
            frame_rate: 60.0,
            trace_path: None,
        }
    }
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wallrun"))
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load from `path` if given, else the default location, else defaults
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::settings_path() {
                Some(path) if path.exists() => path,
                Some(_) => {
                    info!("No settings file found, using defaults");
                    return Self::default();
                }
                None => {
                    warn!("Could not determine config directory");
                    return Self::default();
                }
            },
        };

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {:#}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid settings TOML")
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.player.movement.validate().context("player.movement")?;
        self.player.sensors.validate().context("player.sensors")?;
        self.player.animation.validate().context("player.animation")?;
        self.player.audio.validate().context("player.audio")?;
        self.player.interaction.validate().context("player.interaction")?;
        self.camera.validate().context("camera")?;
        self.time.validate().context("time")?;
        if !(self.scenario.duration > 0.0) {
            anyhow::bail!("scenario.duration must be positive");
        }
        if !(self.scenario.frame_rate > 0.0) {
            anyhow::bail!("scenario.frame_rate must be positive");
        }
        Ok(())
    }

    /// Write the settings to the default location
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let path = dir.join("settings.toml");
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = GameSettings::parse(
            r#"
            [player.movement]
            max_speed = 30.0
            jump_power = 5.0

            [scenario]
            duration = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(settings.player.movement.max_speed, 30.0);
        assert_eq!(settings.player.movement.min_speed, 10.0);
        assert_eq!(settings.player.sensors.wall_run_tag, "Wallrun");
        assert_eq!(settings.scenario.duration, 2.5);
        assert_eq!(settings.time.fixed_timestep, 1.0 / 50.0);
    }

    #[test]
    fn test_menu_roles_and_rules_from_toml() {
        let settings = GameSettings::parse(
            r#"
            [player.audio]
            group = "Surface"
            rules = [{ contains = "Roof", material = "Metal" }]

            [[player.interaction.triggers]]
            volume_name = "Gate"
            role = "moveToCity"
            "#,
        )
        .unwrap();
        assert_eq!(settings.player.audio.group, "Surface");
        assert_eq!(settings.player.audio.rules.len(), 1);
        assert_eq!(settings.player.interaction.triggers.len(), 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_unknown_menu_role_fails_to_parse() {
        let result = GameSettings::parse(
            r#"
            [[player.interaction.triggers]]
            volume_name = "Gate"
            role = "credits"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_inverted_speeds_fail_validation() {
        let settings = GameSettings::parse(
            r#"
            [player.movement]
            min_speed = 25.0
            "#,
        )
        .unwrap();
        let err = settings.validate().unwrap_err();
        assert!(format!("{err:#}").contains("max_speed"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let text = toml::to_string_pretty(&GameSettings::default()).unwrap();
        let parsed = GameSettings::parse(&text).unwrap();
        assert_eq!(parsed.player.movement.snap_angle, 95.0);
        assert_eq!(parsed.camera.max_distance, 12.0);
    }
}
