//! Core types used throughout the controller

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform representing position and rotation of the character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform at `position` whose forward axis points along `forward`
    pub fn from_position_forward(position: Vec3, forward: Vec3) -> Self {
        let mut transform = Self::from_position(position);
        transform.set_forward(forward);
        transform
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Rotate so the forward axis points along `forward`. A zero vector is ignored.
    pub fn set_forward(&mut self, forward: Vec3) {
        let Some(dir) = forward.try_normalize() else {
            return;
        };
        self.rotation = Quat::from_rotation_arc(-Vec3::Z, dir);
    }

    /// Interpolate between two transforms
    pub fn lerp(a: &Transform, b: &Transform, t: f32) -> Transform {
        Transform {
            position: a.position.lerp(b.position, t),
            rotation: a.rotation.slerp(b.rotation, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_halfway() {
        let a = Transform::from_position(Vec3::ZERO);
        let b = Transform::from_position_forward(Vec3::new(2.0, 0.0, 0.0), Vec3::X);
        let mid = Transform::lerp(&a, &b, 0.5);
        assert_eq!(mid.position, Vec3::new(1.0, 0.0, 0.0));
        assert!(mid.forward().dot(Vec3::NEG_Z) > 0.5 && mid.forward().dot(Vec3::X) > 0.5);
    }

    #[test]
    fn test_set_forward() {
        let transform = Transform::from_position_forward(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        assert!((transform.forward() - Vec3::X).length() < 1e-4);
        assert!((transform.rotation * Vec3::Y - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_set_forward_ignores_zero() {
        let mut transform = Transform::default();
        transform.set_forward(Vec3::ZERO);
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }
}
