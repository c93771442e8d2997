//! Movement module
//!
//! The grounded / airborne / wall-running state machine and the sensors
//! that drive its transitions.

mod config;
mod controller;
mod mode;
mod ramp;
pub mod rotation;
mod sensors;
pub mod wall;

pub use config::{MovementConfig, SensorConfig};
pub use controller::{MovementController, MovementSignals, TickReport};
pub use mode::{Mode, WallSide};
pub use ramp::{RampKind, SpeedRamp};
pub use sensors::{GroundSensor, WallContact, WallSensor};
