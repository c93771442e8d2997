//! Ground and wall sensors
//!
//! The ground sensor polls a downward probe every tick. The wall sensor is
//! event driven: it latches trigger-volume crossings until the movement
//! core samples them.

use glam::Vec3;
use tracing::debug;
use wallrun_core::ConfigError;
use wallrun_physics::{CharacterBody, VolumeEvent};

use super::config::SensorConfig;

/// "Is there tagged ground just below the feet?"
#[derive(Debug, Clone)]
pub struct GroundSensor {
    ground_tag: String,
    probe_distance: f32,
}

impl GroundSensor {
    pub fn new(config: &SensorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ground_tag: config.ground_tag.clone(),
            probe_distance: config.probe_distance,
        })
    }

    pub fn probe_distance(&self) -> f32 {
        self.probe_distance
    }

    /// Probe the body once
    pub fn check(&self, body: &dyn CharacterBody) -> bool {
        body.cast_down(self.probe_distance)
            .is_some_and(|hit| hit.surface.has_tag(&self.ground_tag))
    }
}

/// The wall volume currently overlapped
#[derive(Debug, Clone, PartialEq)]
pub struct WallContact {
    /// Name of the volume
    pub volume: String,
    /// The wall's lateral axis (horizontal)
    pub right: Vec3,
}

/// Latches entry into and exit from wall-run volumes
#[derive(Debug, Clone)]
pub struct WallSensor {
    wall_tag: String,
    contact: Option<WallContact>,
    /// Bumped on every entry so the core can tell a fresh entry from a held one
    entries: u64,
}

impl WallSensor {
    pub fn new(config: &SensorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            wall_tag: config.wall_run_tag.clone(),
            contact: None,
            entries: 0,
        })
    }

    /// Record entering a volume. Returns false when the tag is not a wall-run tag.
    pub fn on_enter(&mut self, tag: &str, volume: &str, right: Vec3) -> bool {
        if tag != self.wall_tag {
            return false;
        }
        debug!("Wall volume entered: {}", volume);
        self.contact = Some(WallContact {
            volume: volume.to_string(),
            right: Vec3::new(right.x, 0.0, right.z),
        });
        self.entries += 1;
        true
    }

    /// Record leaving a volume. Leaving a volume other than the current one is ignored.
    pub fn on_exit(&mut self, tag: &str, volume: &str) -> bool {
        if tag != self.wall_tag {
            return false;
        }
        match &self.contact {
            Some(contact) if contact.volume == volume => {
                debug!("Wall volume exited: {}", volume);
                self.contact = None;
                true
            }
            _ => false,
        }
    }

    /// Route a body volume event. Returns true if it concerned a wall volume.
    pub fn handle(&mut self, event: &VolumeEvent) -> bool {
        match event {
            VolumeEvent::Entered { surface, right } => {
                self.on_enter(&surface.tag, &surface.name, *right)
            }
            VolumeEvent::Exited { surface } => self.on_exit(&surface.tag, &surface.name),
        }
    }

    pub fn contact(&self) -> Option<&WallContact> {
        self.contact.as_ref()
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallrun_physics::{FlatBody, SurfaceInfo};

    fn sensors() -> (GroundSensor, WallSensor) {
        let config = SensorConfig::default();
        (
            GroundSensor::new(&config).unwrap(),
            WallSensor::new(&config).unwrap(),
        )
    }

    #[test]
    fn test_ground_requires_tag() {
        let (ground, _) = sensors();
        let tagged = FlatBody::new(Vec3::ZERO, 0.0, SurfaceInfo::new("Floor", "Ground"));
        let untagged = FlatBody::new(Vec3::ZERO, 0.0, SurfaceInfo::new("Floor", "Prop"));
        assert!(ground.check(&tagged));
        assert!(!ground.check(&untagged));
    }

    #[test]
    fn test_ground_probe_distance() {
        let (ground, _) = sensors();
        let mut body = FlatBody::new(Vec3::ZERO, 0.0, SurfaceInfo::new("Floor", "Ground"));
        body.set_position(Vec3::new(0.0, 0.05, 0.0));
        assert!(ground.check(&body));
        body.set_position(Vec3::new(0.0, 0.5, 0.0));
        assert!(!ground.check(&body));
    }

    #[test]
    fn test_wall_sensor_ignores_other_tags() {
        let (_, mut wall) = sensors();
        assert!(!wall.on_enter("Interaction", "Npc", Vec3::X));
        assert!(wall.contact().is_none());
        assert_eq!(wall.entries(), 0);
    }

    #[test]
    fn test_wall_sensor_enter_exit() {
        let (_, mut wall) = sensors();
        assert!(wall.on_enter("Wallrun", "WallA", Vec3::new(1.0, 0.3, 0.0)));
        assert_eq!(wall.contact().map(|c| c.right), Some(Vec3::X));
        assert_eq!(wall.entries(), 1);

        // Exit from a different volume keeps the contact
        assert!(!wall.on_exit("Wallrun", "WallB"));
        assert!(wall.contact().is_some());

        assert!(wall.on_exit("Wallrun", "WallA"));
        assert!(wall.contact().is_none());
    }

    #[test]
    fn test_empty_tag_is_config_error() {
        let config = SensorConfig {
            wall_run_tag: "".into(),
            ..Default::default()
        };
        assert!(WallSensor::new(&config).is_err());
    }
}
