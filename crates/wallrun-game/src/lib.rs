//! Wallrun Game - Character locomotion and the systems around it
//!
//! Provides the movement state machine, its sensors, input buffering,
//! animation mapping, the orbit camera, and menu interaction triggers.

pub mod animation;
pub mod camera;
pub mod character;
pub mod input;
pub mod interaction;
pub mod movement;

pub use animation::{
    map_state, playback_speed, AnimationConfig, AnimationDriver, AnimationState, AnimatorSink,
};
pub use camera::{CameraConfig, OrbitCamera};
pub use character::{Character, CharacterConfig, CharacterError};
pub use input::{InputAction, InputBindings, InputBuffer, InputHandler, InputSample};
pub use interaction::{InteractionConfig, InteractionSystem, MenuRole, MenuSink, MenuTrigger};
pub use movement::{
    GroundSensor, Mode, MovementConfig, MovementController, MovementSignals, SensorConfig,
    TickReport, WallSensor, WallSide,
};
