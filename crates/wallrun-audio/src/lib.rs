//! Wallrun Audio - Ground-material audio switching
//!
//! Maps the names of surfaces the character collides with to a footstep
//! material and forwards the choice to an audio middleware sink.

mod config;
mod error;
mod sink;
mod switch;

pub use config::{GroundSwitchConfig, SwitchRule};
pub use error::AudioError;
pub use sink::{AudioSink, TracingAudioSink};
pub use switch::{GroundMaterial, GroundSwitch};
