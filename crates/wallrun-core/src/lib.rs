//! Wallrun Core - Core types and utilities for the wallrun character controller
//!
//! This crate provides the foundational types shared by the other crates:
//! - Mathematical primitives (re-exported from glam) and horizontal-plane helpers
//! - Transform for character placement and facing
//! - Fixed-timestep time keeping
//! - Configuration error type

pub mod error;
pub mod math;
pub mod time;
pub mod types;

pub use error::ConfigError;
pub use glam::{Quat, Vec2, Vec3};
pub use math::{angle_between_deg, camera_relative, flatten, rotate_about_up};
pub use time::{GameTime, TimeConfig};
pub use types::Transform;
