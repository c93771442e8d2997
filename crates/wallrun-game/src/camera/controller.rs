//! Orbit camera with mouse look, zoom and wall pull-in

use glam::{Vec2, Vec3};
use rapier3d::prelude::{ColliderHandle, QueryFilter};
use wallrun_core::ConfigError;
use wallrun_physics::PhysicsWorld;

use super::CameraConfig;

/// Camera orbiting behind a target
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    /// Yaw in radians; 0 looks down -Z, positive turns toward +X
    yaw: f32,
    /// Pitch in radians; positive looks up
    pitch: f32,
    target_distance: f32,
    current_distance: f32,
    position: Vec3,
    look_at: Vec3,
    /// Collider the pull-in ray ignores (the character's own capsule)
    ignored: Option<ColliderHandle>,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let distance = config.default_distance;
        Ok(Self {
            config,
            yaw: 0.0,
            pitch: 0.0,
            target_distance: distance,
            current_distance: distance,
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
            ignored: None,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Yaw consumed by the movement core
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Distance after smoothing and pull-in
    pub fn distance(&self) -> f32 {
        self.current_distance
    }

    /// View direction
    pub fn forward(&self) -> Vec3 {
        let cos_pitch = self.pitch.cos();
        Vec3::new(
            self.yaw.sin() * cos_pitch,
            self.pitch.sin(),
            -self.yaw.cos() * cos_pitch,
        )
    }

    pub fn set_ignored_collider(&mut self, handle: Option<ColliderHandle>) {
        self.ignored = handle;
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(
            self.config.pitch_min.to_radians(),
            self.config.pitch_max.to_radians(),
        );
    }

    /// Apply a mouse delta in pixels
    pub fn handle_mouse_look(&mut self, mouse_delta: Vec2) {
        self.yaw += mouse_delta.x * self.config.sensitivity;
        self.set_pitch(self.pitch - mouse_delta.y * self.config.sensitivity);
    }

    /// Handle scroll wheel zoom
    pub fn handle_zoom(&mut self, scroll_delta: f32) {
        self.target_distance = (self.target_distance - scroll_delta * self.config.zoom_speed)
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Place the camera behind `target` (the character's feet)
    pub fn update(&mut self, target: Vec3, physics: Option<&PhysicsWorld>, dt: f32) {
        let zoom_lerp = 1.0 - (1.0 - self.config.zoom_smoothing).powf(dt * 60.0);
        self.current_distance += (self.target_distance - self.current_distance) * zoom_lerp;

        self.look_at = target + Vec3::Y * self.config.target_height;
        let back = -self.forward();
        let ideal = self.look_at + back * self.current_distance;

        let Some(physics) = physics else {
            self.position = ideal;
            return;
        };

        let mut filter = QueryFilter::default().exclude_sensors();
        if let Some(handle) = self.ignored {
            filter = filter.exclude_collider(handle);
        }
        let reach = self.current_distance + self.config.collision_radius;
        self.position = match physics.raycast(self.look_at, back, reach, filter) {
            Some((_, toi)) => {
                let safe = (toi - self.config.collision_radius).max(0.0);
                self.look_at + back * safe
            }
            None => ideal,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(CameraConfig::default()).unwrap()
    }

    #[test]
    fn test_pitch_clamping() {
        let mut camera = camera();
        camera.set_pitch(100.0_f32.to_radians());
        assert!(camera.pitch() <= 75.0_f32.to_radians() + 1e-4);

        camera.handle_mouse_look(Vec2::new(0.0, 1.0e6));
        assert!(camera.pitch() >= (-60.0_f32).to_radians() - 1e-4);
    }

    #[test]
    fn test_mouse_x_turns_yaw() {
        let mut camera = camera();
        camera.handle_mouse_look(Vec2::new(100.0, 0.0));
        assert!((camera.yaw() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_sits_behind_target() {
        let mut camera = camera();
        camera.update(Vec3::ZERO, None, 0.016);
        // Looking down -Z, so the camera is at +Z
        assert!(camera.position().z > 5.9);
        assert!((camera.position().y - 1.6).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = camera();
        camera.handle_zoom(100.0);
        for _ in 0..200 {
            camera.update(Vec3::ZERO, None, 0.016);
        }
        assert!((camera.distance() - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_wall_pulls_camera_in() {
        let mut world = PhysicsWorld::new();
        world.create_static_box(
            Vec3::new(5.0, 5.0, 0.5),
            Vec3::new(0.0, 0.0, 3.0),
            "House_Wall",
            "Untagged",
        );
        world.update_queries();

        let mut camera = camera();
        camera.update(Vec3::ZERO, Some(&world), 0.016);
        // Wall face at z = 2.5
        assert!(camera.position().z < 2.5);
        assert!(camera.position().z > 1.5);
    }

    #[test]
    fn test_rejects_inverted_distances() {
        let config = CameraConfig {
            min_distance: 10.0,
            max_distance: 2.0,
            ..Default::default()
        };
        assert!(OrbitCamera::new(config).is_err());
    }
}
