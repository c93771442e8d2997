//! Third-person orbit camera
//!
//! The camera's yaw is what makes movement input camera-relative.

mod config;
mod controller;

pub use config::CameraConfig;
pub use controller::OrbitCamera;
