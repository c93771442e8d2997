//! Character body capability.
//!
//! The movement core never talks to a physics engine directly. It asks a
//! [`CharacterBody`] to move, to probe downward, and to report trigger-volume
//! crossings. Any backend that can answer those four calls can drive the
//! controller.

use glam::Vec3;

use crate::surface::{SurfaceHit, SurfaceInfo};

/// Result of a single collide-and-slide move
#[derive(Debug, Clone, Default)]
pub struct MoveOutcome {
    /// Translation actually applied after collision resolution
    pub applied: Vec3,
    /// Whether the backend considers the body supported after the move
    pub grounded: bool,
    /// Surfaces touched during the move
    pub collisions: Vec<SurfaceInfo>,
}

/// A trigger-volume crossing
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeEvent {
    /// The body started overlapping a volume
    Entered {
        surface: SurfaceInfo,
        /// The volume's lateral (right) axis, flattened to the horizontal plane
        right: Vec3,
    },
    /// The body stopped overlapping a volume
    Exited { surface: SurfaceInfo },
}

impl VolumeEvent {
    /// The volume this event refers to
    pub fn surface(&self) -> &SurfaceInfo {
        match self {
            VolumeEvent::Entered { surface, .. } | VolumeEvent::Exited { surface } => surface,
        }
    }
}

/// What the movement core needs from a physics backend
pub trait CharacterBody {
    /// Current feet position
    fn position(&self) -> Vec3;

    /// Move by `translation`, resolving collisions
    fn move_by(&mut self, translation: Vec3, dt: f32) -> MoveOutcome;

    /// Cast straight down from the feet, up to `max_distance`
    fn cast_down(&self, max_distance: f32) -> Option<SurfaceHit>;

    /// Volume crossings since the last call
    fn drain_volume_events(&mut self) -> Vec<VolumeEvent>;
}
