//! Character body using rapier3d's kinematic character controller

use std::collections::HashMap;

use glam::Vec3;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;
use tracing::debug;

use crate::body::{CharacterBody, MoveOutcome, VolumeEvent};
use crate::surface::{SurfaceHit, SurfaceInfo};
use crate::PhysicsWorld;

/// Character controller configuration
#[derive(Debug, Clone)]
pub struct CharacterControllerConfig {
    /// Capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Maximum slope angle in degrees (default: 45)
    pub max_slope_angle: f32,
    /// Step height for climbing stairs (default: 0.25m)
    pub step_height: f32,
    /// Skin width for collision detection (default: 0.02m)
    pub skin_width: f32,
}

impl Default for CharacterControllerConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            max_slope_angle: 45.0,
            step_height: 0.25,
            skin_width: 0.02,
        }
    }
}

/// Kinematic capsule that tracks its feet position and the volumes it overlaps
pub struct CharacterController {
    /// Configuration
    pub config: CharacterControllerConfig,
    /// Current feet position
    pub position: Vec3,
    /// Whether rapier reported the capsule as supported after the last move
    pub grounded: bool,
    /// The collider handle for this character
    pub collider_handle: Option<ColliderHandle>,
    /// Rapier's kinematic character controller
    controller: KinematicCharacterController,
    /// Volumes overlapped after the last detection pass
    inside: HashMap<ColliderHandle, SurfaceInfo>,
}

impl CharacterController {
    /// Create a new character controller with default config
    pub fn new() -> Self {
        Self::with_config(CharacterControllerConfig::default())
    }

    /// Create a new character controller with custom config
    pub fn with_config(config: CharacterControllerConfig) -> Self {
        let mut controller = KinematicCharacterController::default();
        controller.max_slope_climb_angle = config.max_slope_angle.to_radians();
        controller.min_slope_slide_angle = config.max_slope_angle.to_radians();
        controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(config.step_height),
            min_width: CharacterLength::Relative(0.5),
            include_dynamic_bodies: true,
        });
        // Vertical motion is owned by the movement core
        controller.snap_to_ground = None;
        controller.offset = CharacterLength::Absolute(config.skin_width);

        Self {
            config,
            position: Vec3::ZERO,
            grounded: false,
            collider_handle: None,
            controller,
            inside: HashMap::new(),
        }
    }

    /// Spawn the character in the physics world
    pub fn spawn(&mut self, physics: &mut PhysicsWorld, position: Vec3) -> ColliderHandle {
        self.position = position;
        self.inside.clear();

        let half_height = (self.config.height - 2.0 * self.config.radius) / 2.0;
        let center = self.center_position();
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), self.config.radius)
            .translation(vector![center.x, center.y, center.z])
            .friction(0.0) // Smooth sliding against walls
            .restitution(0.0)
            .build();

        let handle = physics.add_static_collider(collider);
        self.collider_handle = Some(handle);
        physics.update_queries();
        handle
    }

    /// Move the character with collision detection
    pub fn move_character(
        &mut self,
        physics: &mut PhysicsWorld,
        desired_translation: Vec3,
        dt: f32,
    ) -> MoveOutcome {
        let Some(collider_handle) = self.collider_handle else {
            return MoveOutcome::default();
        };

        let Some(collider) = physics.collider_set.get(collider_handle) else {
            return MoveOutcome::default();
        };

        let shape = collider.shape();
        let center = self.center_position();
        let current_pos = Isometry::translation(center.x, center.y, center.z);

        let mut touched = Vec::new();
        let movement = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            physics.query_pipeline(),
            shape,
            &current_pos,
            vector![desired_translation.x, desired_translation.y, desired_translation.z],
            QueryFilter::default()
                .exclude_sensors()
                .exclude_collider(collider_handle),
            |collision| touched.push(collision.handle),
        );

        self.grounded = movement.grounded;

        let applied = Vec3::new(
            movement.translation.x,
            movement.translation.y,
            movement.translation.z,
        );
        self.position += applied;

        let center = self.center_position();
        if let Some(collider) = physics.collider_set.get_mut(collider_handle) {
            collider.set_translation(vector![center.x, center.y, center.z]);
        }

        let collisions = touched
            .into_iter()
            .filter_map(|handle| physics.surface(handle).cloned())
            .collect();

        MoveOutcome {
            applied,
            grounded: movement.grounded,
            collisions,
        }
    }

    /// Cast straight down from just above the feet, ignoring volumes and the capsule itself
    pub fn cast_down(&self, physics: &PhysicsWorld, max_distance: f32) -> Option<SurfaceHit> {
        let offset = self.config.skin_width.max(0.01);
        let origin = self.position + Vec3::Y * offset;

        let mut filter = QueryFilter::default().exclude_sensors();
        if let Some(handle) = self.collider_handle {
            filter = filter.exclude_collider(handle);
        }

        let hit = physics.raycast_detailed(origin, Vec3::NEG_Y, max_distance + offset, filter)?;
        let surface = physics
            .surface(hit.collider)
            .cloned()
            .unwrap_or_else(|| SurfaceInfo::new("", ""));

        Some(SurfaceHit {
            distance: (hit.distance - offset).max(0.0),
            point: hit.point,
            normal: hit.normal,
            surface,
        })
    }

    /// Diff the set of overlapped trigger volumes against the previous pass
    pub fn detect_volumes(&mut self, physics: &PhysicsWorld) -> Vec<VolumeEvent> {
        let Some(collider_handle) = self.collider_handle else {
            return Vec::new();
        };
        let Some(collider) = physics.get_collider(collider_handle) else {
            return Vec::new();
        };

        let center = self.center_position();
        let pos = Isometry::translation(center.x, center.y, center.z);
        let filter = QueryFilter::default()
            .exclude_solids()
            .exclude_collider(collider_handle);
        let overlapping = physics.intersections(collider.shape(), &pos, filter);

        let mut events = Vec::new();

        let exited: Vec<ColliderHandle> = self
            .inside
            .keys()
            .filter(|handle| !overlapping.contains(handle))
            .copied()
            .collect();
        for handle in exited {
            if let Some(surface) = self.inside.remove(&handle) {
                debug!("Left volume {}", surface.name);
                events.push(VolumeEvent::Exited { surface });
            }
        }

        for handle in overlapping {
            if self.inside.contains_key(&handle) {
                continue;
            }
            let (Some(volume), Some(surface)) = (physics.get_collider(handle), physics.surface(handle))
            else {
                continue;
            };
            let axis = volume.rotation().transform_vector(&vector![1.0, 0.0, 0.0]);
            let right = Vec3::new(axis.x, 0.0, axis.z).normalize_or_zero();

            debug!("Entered volume {}", surface.name);
            self.inside.insert(handle, surface.clone());
            events.push(VolumeEvent::Entered {
                surface: surface.clone(),
                right,
            });
        }

        events
    }

    /// Set the character's position directly (teleport)
    pub fn set_position(&mut self, physics: &mut PhysicsWorld, position: Vec3) {
        self.position = position;
        let center = self.center_position();

        if let Some(handle) = self.collider_handle {
            if let Some(collider) = physics.collider_set.get_mut(handle) {
                collider.set_translation(vector![center.x, center.y, center.z]);
            }
        }
    }

    /// Get the center position (middle of capsule)
    pub fn center_position(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + self.config.height / 2.0,
            self.position.z,
        )
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::new()
    }
}

/// [`CharacterBody`] over a rapier world and one kinematic capsule
pub struct RapierBody<'a> {
    world: &'a mut PhysicsWorld,
    character: &'a mut CharacterController,
}

impl<'a> RapierBody<'a> {
    pub fn new(world: &'a mut PhysicsWorld, character: &'a mut CharacterController) -> Self {
        Self { world, character }
    }
}

impl CharacterBody for RapierBody<'_> {
    fn position(&self) -> Vec3 {
        self.character.position
    }

    fn move_by(&mut self, translation: Vec3, dt: f32) -> MoveOutcome {
        self.character.move_character(self.world, translation, dt)
    }

    fn cast_down(&self, max_distance: f32) -> Option<SurfaceHit> {
        self.character.cast_down(self.world, max_distance)
    }

    fn drain_volume_events(&mut self) -> Vec<VolumeEvent> {
        self.world.update_queries();
        self.character.detect_volumes(self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_floor() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0, "Floor_Main", "Ground");
        world.update_queries();
        world
    }

    #[test]
    fn test_character_controller_config() {
        let config = CharacterControllerConfig::default();
        assert_eq!(config.height, 1.8);
        assert_eq!(config.radius, 0.4);
        assert_eq!(config.max_slope_angle, 45.0);
    }

    #[test]
    fn test_cast_down_reports_tagged_ground() {
        let mut world = world_with_floor();
        let mut character = CharacterController::new();
        character.spawn(&mut world, Vec3::new(0.0, 0.5, 0.0));

        let hit = character.cast_down(&world, 1.0).expect("floor within range");
        assert!((hit.distance - 0.5).abs() < 0.02);
        assert!(hit.surface.has_tag("Ground"));

        assert!(character.cast_down(&world, 0.2).is_none());
    }

    #[test]
    fn test_volume_enter_and_exit() {
        let mut world = world_with_floor();
        world.create_volume(
            Vec3::new(1.0, 2.0, 1.0),
            Vec3::new(5.0, 1.0, 0.0),
            0.0,
            "WallRun_A",
            "Wallrun",
        );
        let mut character = CharacterController::new();
        character.spawn(&mut world, Vec3::ZERO);

        let mut body = RapierBody::new(&mut world, &mut character);
        assert!(body.drain_volume_events().is_empty());

        body.character.set_position(body.world, Vec3::new(5.0, 0.0, 0.0));
        let events = body.drain_volume_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            VolumeEvent::Entered { surface, right } => {
                assert_eq!(surface.tag, "Wallrun");
                assert!((*right - Vec3::X).length() < 1e-4);
            }
            other => panic!("expected enter, got {other:?}"),
        }

        // Staying inside produces nothing new
        assert!(body.drain_volume_events().is_empty());

        body.character.set_position(body.world, Vec3::new(-5.0, 0.0, 0.0));
        let events = body.drain_volume_events();
        assert!(matches!(events.as_slice(), [VolumeEvent::Exited { .. }]));
    }
}
