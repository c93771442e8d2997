//! Wallrun Physics - Physics backends for the wallrun controller
//!
//! Provides a rapier3d world with tagged colliders and trigger volumes, a
//! kinematic character body, and a plane-only backend for headless use.

mod body;
mod character_controller;
mod flat;
mod surface;

pub use body::{CharacterBody, MoveOutcome, VolumeEvent};
pub use character_controller::{CharacterController, CharacterControllerConfig, RapierBody};
pub use flat::{FlatBody, FlatVolume};
pub use surface::{SurfaceHit, SurfaceInfo};

use std::collections::HashMap;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/50)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 50.0,
        }
    }
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Names and tags of registered colliders
    surfaces: HashMap<ColliderHandle, SurfaceInfo>,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            surfaces: HashMap::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation
    pub fn step(&mut self) {
        let gravity = vector![self.config.gravity.x, self.config.gravity.y, self.config.gravity.z];

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        // Update query pipeline after physics step
        self.update_queries();
    }

    /// Refresh the query pipeline so newly added or moved colliders are visible to casts
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Add a static collider and register its name and tag
    pub fn add_tagged_collider(
        &mut self,
        collider: Collider,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> ColliderHandle {
        let handle = self.add_static_collider(collider);
        self.surfaces.insert(handle, SurfaceInfo::new(name, tag));
        handle
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Look up the name and tag registered for a collider
    pub fn surface(&self, handle: ColliderHandle) -> Option<&SurfaceInfo> {
        self.surfaces.get(&handle)
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
    }

    /// Cast a ray and get detailed hit information
    pub fn raycast_detailed(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray_and_get_normal(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
            .map(|(handle, intersection)| RaycastHit {
                collider: handle,
                distance: intersection.time_of_impact,
                point: origin + direction * intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
            })
    }

    /// Collect every collider overlapping `shape` placed at `position`
    pub fn intersections(
        &self,
        shape: &dyn Shape,
        position: &Isometry<Real>,
        filter: QueryFilter,
    ) -> Vec<ColliderHandle> {
        let mut hits = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            position,
            shape,
            filter,
            |handle| {
                hits.push(handle);
                true
            },
        );
        hits
    }

    pub(crate) fn query_pipeline(&self) -> &QueryPipeline {
        &self.query_pipeline
    }

    /// Create a tagged ground plane collider
    pub fn create_ground(
        &mut self,
        y: f32,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_tagged_collider(ground, name, tag)
    }

    /// Create a tagged static box collider
    pub fn create_static_box(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .build();
        self.add_tagged_collider(collider, name, tag)
    }

    /// Create a box-shaped trigger volume rotated `yaw` radians about the up axis.
    ///
    /// The volume's local +X axis becomes its reported right axis.
    pub fn create_volume(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        yaw: f32,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .rotation(vector![0.0, yaw, 0.0])
            .sensor(true)
            .build();
        self.add_tagged_collider(collider, name, tag)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Detailed raycast hit information
#[derive(Debug, Clone)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.config.gravity, Vec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn test_ground_is_registered() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0, "Floor", "Ground");
        assert!(world.get_collider(ground).is_some());
        assert_eq!(world.surface(ground).map(|s| s.tag.as_str()), Some("Ground"));
    }

    #[test]
    fn test_raycast() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0, "Floor", "Ground");
        world.update_queries();

        let hit = world.raycast_detailed(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            100.0,
            QueryFilter::default(),
        );
        let hit = hit.expect("ray should hit the ground plane");
        assert!((hit.distance - 10.0).abs() < 1e-3);
        assert!((hit.normal - Vec3::Y).length() < 1e-3);
    }

    #[test]
    fn test_volume_is_sensor() {
        let mut world = PhysicsWorld::new();
        let volume = world.create_volume(Vec3::ONE, Vec3::ZERO, 0.0, "WallA", "Wallrun");
        let collider = world.get_collider(volume).unwrap();
        assert!(collider.is_sensor());
    }
}
