use serde::{Deserialize, Serialize};

use crate::error::AudioError;
use crate::switch::GroundMaterial;

/// Substring rule: surfaces whose name contains `contains` use `material`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchRule {
    pub contains: String,
    pub material: GroundMaterial,
}

impl SwitchRule {
    pub fn new(contains: impl Into<String>, material: GroundMaterial) -> Self {
        Self {
            contains: contains.into(),
            material,
        }
    }
}

/// Ground switch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundSwitchConfig {
    /// Switch group name in the middleware
    pub group: String,
    /// Ordered rules; the first match wins
    pub rules: Vec<SwitchRule>,
}

impl Default for GroundSwitchConfig {
    fn default() -> Self {
        Self {
            group: "Ground".to_string(),
            rules: vec![
                SwitchRule::new("Air", GroundMaterial::Metal),
                SwitchRule::new("Jump", GroundMaterial::Metal),
                SwitchRule::new("House", GroundMaterial::Concrete),
                SwitchRule::new("Floor", GroundMaterial::Concrete),
            ],
        }
    }
}

impl GroundSwitchConfig {
    pub fn validate(&self) -> Result<(), AudioError> {
        if self.group.trim().is_empty() {
            return Err(AudioError::InvalidConfig("switch group must not be empty".into()));
        }
        if let Some(index) = self.rules.iter().position(|r| r.contains.is_empty()) {
            // An empty substring would match every surface
            return Err(AudioError::InvalidConfig(format!(
                "rule {index} has an empty substring"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GroundSwitchConfig::default();
        assert_eq!(config.group, "Ground");
        assert_eq!(config.rules.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_substring_rejected() {
        let config = GroundSwitchConfig {
            rules: vec![SwitchRule::new("", GroundMaterial::Metal)],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(AudioError::InvalidConfig("rule 0 has an empty substring".into()))
        );
    }

    #[test]
    fn empty_group_rejected() {
        let config = GroundSwitchConfig {
            group: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
