use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GroundSwitchConfig;
use crate::error::AudioError;
use crate::sink::AudioSink;

/// Footstep material reported to the audio middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundMaterial {
    Metal,
    Concrete,
}

impl GroundMaterial {
    /// Switch value understood by the middleware
    pub fn as_str(&self) -> &'static str {
        match self {
            GroundMaterial::Metal => "Metal",
            GroundMaterial::Concrete => "Concrete",
        }
    }
}

impl fmt::Display for GroundMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroundMaterial {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Metal" | "metal" => Ok(GroundMaterial::Metal),
            "Concrete" | "concrete" => Ok(GroundMaterial::Concrete),
            other => Err(AudioError::UnknownMaterial(other.to_string())),
        }
    }
}

/// Sets the ground switch whenever the character touches a recognised surface.
#[derive(Debug, Clone)]
pub struct GroundSwitch {
    config: GroundSwitchConfig,
    last: Option<GroundMaterial>,
}

impl GroundSwitch {
    /// Create a switch adapter, rejecting invalid rule sets
    pub fn new(config: GroundSwitchConfig) -> Result<Self, AudioError> {
        config.validate()?;
        Ok(Self { config, last: None })
    }

    /// Material for a surface name; first matching rule wins
    pub fn classify(&self, surface_name: &str) -> Option<GroundMaterial> {
        self.config
            .rules
            .iter()
            .find(|rule| surface_name.contains(rule.contains.as_str()))
            .map(|rule| rule.material)
    }

    /// Handle one collision. Unknown surfaces leave the switch untouched.
    pub fn on_collision(
        &mut self,
        surface_name: &str,
        target: &str,
        sink: &mut dyn AudioSink,
    ) -> Option<GroundMaterial> {
        let material = self.classify(surface_name)?;
        if self.last != Some(material) {
            debug!("Ground switch -> {} ({})", material, surface_name);
        }
        sink.set_switch(&self.config.group, material.as_str(), target);
        self.last = Some(material);
        Some(material)
    }

    /// Last material sent, if any
    pub fn current(&self) -> Option<GroundMaterial> {
        self.last
    }

    pub fn config(&self) -> &GroundSwitchConfig {
        &self.config
    }
}
