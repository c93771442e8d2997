//! Menu interaction triggers
//!
//! Trigger volumes in the level open and close menus when the player walks
//! in and out of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wallrun_core::error::ensure_not_empty;
use wallrun_core::ConfigError;
use wallrun_physics::VolumeEvent;

/// Which menu a trigger controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MenuRole {
    Intro,
    MoveToCity,
}

impl MenuRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::MoveToCity => "moveToCity",
        }
    }
}

impl fmt::Display for MenuRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuRole {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intro" => Ok(Self::Intro),
            "moveToCity" => Ok(Self::MoveToCity),
            other => Err(ConfigError::Unknown {
                kind: "menu role",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for MenuRole {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MenuRole> for String {
    fn from(role: MenuRole) -> Self {
        role.as_str().to_string()
    }
}

/// A volume that toggles one menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuTrigger {
    pub volume_name: String,
    pub role: MenuRole,
}

impl MenuTrigger {
    pub fn new(volume_name: impl Into<String>, role: MenuRole) -> Self {
        Self {
            volume_name: volume_name.into(),
            role,
        }
    }
}

/// Interaction volumes configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Tag carried by interaction volumes
    pub tag: String,
    pub triggers: Vec<MenuTrigger>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            tag: "Interaction".to_string(),
            triggers: vec![
                MenuTrigger::new("IntroSign", MenuRole::Intro),
                MenuTrigger::new("CityGate", MenuRole::MoveToCity),
            ],
        }
    }
}

impl InteractionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_not_empty("interaction.tag", &self.tag)?;
        for trigger in &self.triggers {
            ensure_not_empty("interaction.triggers.volume_name", &trigger.volume_name)?;
        }
        Ok(())
    }
}

/// Menu visibility capability
pub trait MenuSink {
    fn set_visible(&mut self, role: MenuRole, visible: bool);
}

/// Routes interaction volume events to menu visibility
#[derive(Debug, Clone)]
pub struct InteractionSystem {
    config: InteractionConfig,
}

impl InteractionSystem {
    pub fn new(config: InteractionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Menu role bound to a volume name
    pub fn role_for(&self, volume_name: &str) -> Option<MenuRole> {
        self.config
            .triggers
            .iter()
            .find(|trigger| trigger.volume_name == volume_name)
            .map(|trigger| trigger.role)
    }

    /// Show the menu on enter, hide it on exit. Returns the role touched, if any.
    pub fn handle(&self, event: &VolumeEvent, menu: &mut dyn MenuSink) -> Option<MenuRole> {
        let surface = event.surface();
        if !surface.has_tag(&self.config.tag) {
            return None;
        }
        let role = self.role_for(&surface.name)?;
        let visible = matches!(event, VolumeEvent::Entered { .. });
        debug!("Menu {} visible: {}", role, visible);
        menu.set_visible(role, visible);
        Some(role)
    }
}
