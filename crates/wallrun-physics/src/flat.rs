//! Plane-only character body.
//!
//! An infinite tagged ground plane plus axis-aligned trigger boxes. There is
//! no solver: the body simply refuses to sink below the plane. Useful for
//! deterministic tests and headless runs where a full rapier world is
//! unnecessary.

use glam::Vec3;

use crate::body::{CharacterBody, MoveOutcome, VolumeEvent};
use crate::surface::{SurfaceHit, SurfaceInfo};

/// Axis-aligned trigger box with an explicit right axis
#[derive(Debug, Clone)]
pub struct FlatVolume {
    pub surface: SurfaceInfo,
    pub min: Vec3,
    pub max: Vec3,
    /// Lateral axis reported on entry
    pub right: Vec3,
}

impl FlatVolume {
    pub fn new(surface: SurfaceInfo, min: Vec3, max: Vec3, right: Vec3) -> Self {
        Self {
            surface,
            min,
            max,
            right,
        }
    }

    fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Character body over a flat ground plane
#[derive(Debug, Clone)]
pub struct FlatBody {
    position: Vec3,
    ground_height: f32,
    ground: SurfaceInfo,
    volumes: Vec<FlatVolume>,
    inside: Vec<bool>,
}

impl FlatBody {
    /// Create a body standing on a plane at `ground_height`
    pub fn new(position: Vec3, ground_height: f32, ground: SurfaceInfo) -> Self {
        Self {
            position: Vec3::new(position.x, position.y.max(ground_height), position.z),
            ground_height,
            ground,
            volumes: Vec::new(),
            inside: Vec::new(),
        }
    }

    /// Add a trigger volume
    pub fn with_volume(mut self, volume: FlatVolume) -> Self {
        self.add_volume(volume);
        self
    }

    pub fn add_volume(&mut self, volume: FlatVolume) {
        self.volumes.push(volume);
        self.inside.push(false);
    }

    /// Teleport without generating collisions
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }
}

impl CharacterBody for FlatBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, translation: Vec3, _dt: f32) -> MoveOutcome {
        let start = self.position;
        let mut target = start + translation;
        let mut collisions = Vec::new();

        if target.y <= self.ground_height {
            target.y = self.ground_height;
            if translation.y < 0.0 {
                collisions.push(self.ground.clone());
            }
        }

        self.position = target;
        MoveOutcome {
            applied: target - start,
            grounded: self.position.y <= self.ground_height,
            collisions,
        }
    }

    fn cast_down(&self, max_distance: f32) -> Option<SurfaceHit> {
        let distance = self.position.y - self.ground_height;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        Some(SurfaceHit {
            distance,
            point: Vec3::new(self.position.x, self.ground_height, self.position.z),
            normal: Vec3::Y,
            surface: self.ground.clone(),
        })
    }

    fn drain_volume_events(&mut self) -> Vec<VolumeEvent> {
        let mut events = Vec::new();
        for (volume, inside) in self.volumes.iter().zip(self.inside.iter_mut()) {
            let now = volume.contains(self.position);
            match (*inside, now) {
                (false, true) => events.push(VolumeEvent::Entered {
                    surface: volume.surface.clone(),
                    right: volume.right,
                }),
                (true, false) => events.push(VolumeEvent::Exited {
                    surface: volume.surface.clone(),
                }),
                _ => {}
            }
            *inside = now;
        }
        events
    }
}
