//! Player character
//!
//! Wires input, sensors, the movement core, animation, the audio switch and
//! menu triggers around one [`CharacterBody`].

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;
use wallrun_audio::{AudioError, AudioSink, GroundSwitch, GroundSwitchConfig};
use wallrun_core::{ConfigError, Transform};
use wallrun_physics::CharacterBody;

use crate::animation::{AnimationConfig, AnimationDriver, AnimationState, AnimatorSink};
use crate::input::InputHandler;
use crate::interaction::{InteractionConfig, InteractionSystem, MenuSink};
use crate::movement::{
    GroundSensor, MovementConfig, MovementController, SensorConfig, TickReport, WallSensor,
};

/// Errors raised while building a character
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid audio configuration: {0}")]
    Audio(#[from] AudioError),
}

/// Everything needed to build a [`Character`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Name used as the audio switch target
    pub name: String,
    pub movement: MovementConfig,
    pub sensors: SensorConfig,
    pub animation: AnimationConfig,
    pub audio: GroundSwitchConfig,
    pub interaction: InteractionConfig,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            movement: MovementConfig::default(),
            sensors: SensorConfig::default(),
            animation: AnimationConfig::default(),
            audio: GroundSwitchConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }
}

pub struct Character {
    name: String,
    input: InputHandler,
    controller: MovementController,
    ground: GroundSensor,
    wall: WallSensor,
    animation: AnimationDriver,
    ground_switch: GroundSwitch,
    interaction: InteractionSystem,
}

impl Character {
    pub fn new(config: CharacterConfig) -> Result<Self, CharacterError> {
        let character = Self {
            input: InputHandler::new(),
            controller: MovementController::new(config.movement)?,
            ground: GroundSensor::new(&config.sensors)?,
            wall: WallSensor::new(&config.sensors)?,
            animation: AnimationDriver::new(config.animation)?,
            ground_switch: GroundSwitch::new(config.audio)?,
            interaction: InteractionSystem::new(config.interaction)?,
            name: config.name,
        };
        info!("Character '{}' ready", character.name);
        Ok(character)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn controller(&self) -> &MovementController {
        &self.controller
    }

    pub fn wall_sensor(&self) -> &WallSensor {
        &self.wall
    }

    pub fn ground_switch(&self) -> &GroundSwitch {
        &self.ground_switch
    }

    pub fn animation(&self) -> &AnimationDriver {
        &self.animation
    }

    /// Pose at `position`, facing the movement direction
    pub fn transform(&self, position: Vec3) -> Transform {
        Transform::from_position_forward(position, self.controller.facing())
    }

    /// One physics step
    pub fn fixed_update(
        &mut self,
        body: &mut dyn CharacterBody,
        camera_yaw: f32,
        dt: f32,
        audio: &mut dyn AudioSink,
        menu: &mut dyn MenuSink,
    ) -> TickReport {
        for event in body.drain_volume_events() {
            if !self.wall.handle(&event) {
                self.interaction.handle(&event, menu);
            }
        }

        let sample = self.input.buffer.sample();
        let report = self
            .controller
            .tick(sample, camera_yaw, body, &self.ground, &self.wall, dt);

        for surface in &report.collisions {
            self.ground_switch.on_collision(&surface.name, &self.name, audio);
        }
        report
    }

    /// Once per rendered frame
    pub fn update(&mut self, animator: &mut dyn AnimatorSink) -> AnimationState {
        let signals = self.controller.signals();
        self.animation.update(&signals, animator)
    }

    pub fn trigger_victory(&self, animator: &mut dyn AnimatorSink) {
        self.animation.trigger_victory(animator);
    }
}
