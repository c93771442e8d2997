//! Facing updates

use glam::Vec3;
use wallrun_core::{angle_between_deg, flatten};

/// Turns sharper than `threshold` degrees snap; exactly at the threshold still interpolates.
pub fn should_snap(angle_deg: f32, threshold: f32) -> bool {
    angle_deg > threshold
}

/// Turn `forward` toward `target`.
///
/// A zero target leaves the facing unchanged.
pub fn face_towards(
    forward: Vec3,
    target: Vec3,
    rotation_speed: f32,
    snap_angle: f32,
    dt: f32,
) -> Vec3 {
    let Some(target) = flatten(target).try_normalize() else {
        return forward;
    };

    let angle = angle_between_deg(forward, target);
    if should_snap(angle, snap_angle) {
        return target;
    }

    let t = (rotation_speed * dt).clamp(0.0, 1.0);
    flatten(forward.lerp(target, t))
        .try_normalize()
        .unwrap_or(target)
}
