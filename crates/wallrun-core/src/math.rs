//! Horizontal-plane vector helpers
//!
//! World space is right-handed, Y up, with yaw 0 looking down -Z.

use glam::{Quat, Vec2, Vec3};

/// Drop the vertical component of a vector
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Unsigned angle between two vectors in degrees.
///
/// Returns 0 when either vector is (nearly) zero.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < 1e-12 {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Rotate a vector about the world up axis (counter-clockwise seen from above)
pub fn rotate_about_up(v: Vec3, degrees: f32) -> Vec3 {
    Quat::from_rotation_y(degrees.to_radians()) * v
}

/// Rotate a 2D movement intent (x = lateral, y = forward) into world space
/// using the camera's yaw in radians.
///
/// The result keeps the intent's magnitude and lies in the horizontal plane.
pub fn camera_relative(intent: Vec2, camera_yaw: f32) -> Vec3 {
    if intent == Vec2::ZERO {
        return Vec3::ZERO;
    }
    let local = Vec3::new(intent.x, 0.0, -intent.y);
    Quat::from_rotation_y(-camera_yaw) * local
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_camera_relative_forward() {
        let dir = camera_relative(Vec2::new(0.0, 1.0), 0.0);
        assert!(approx(dir, Vec3::NEG_Z));
    }

    #[test]
    fn test_camera_relative_follows_yaw() {
        // Yawing the camera 90 degrees turns "forward" toward +X
        let yaw = std::f32::consts::FRAC_PI_2;
        let dir = camera_relative(Vec2::new(0.0, 1.0), yaw);
        assert!(approx(dir, Vec3::X));

        let right = camera_relative(Vec2::new(1.0, 0.0), yaw);
        assert!(approx(right, Vec3::Z));
    }

    #[test]
    fn test_camera_relative_zero() {
        assert_eq!(camera_relative(Vec2::ZERO, 1.3), Vec3::ZERO);
    }

    #[test]
    fn test_angle_between() {
        assert!((angle_between_deg(Vec3::X, Vec3::Z) - 90.0).abs() < 1e-3);
        assert!((angle_between_deg(Vec3::X, -Vec3::X) - 180.0).abs() < 1e-3);
        assert_eq!(angle_between_deg(Vec3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_rotate_about_up() {
        let v = rotate_about_up(Vec3::X, 90.0);
        assert!(approx(v, Vec3::NEG_Z));
    }

    #[test]
    fn test_flatten() {
        assert_eq!(flatten(Vec3::new(1.0, 5.0, -2.0)), Vec3::new(1.0, 0.0, -2.0));
    }
}
