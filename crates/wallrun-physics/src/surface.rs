//! Tagged surfaces and the query results that reference them

use glam::Vec3;

/// Name and tag attached to a collider or volume
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceInfo {
    /// Object name, used for substring matching (audio materials)
    pub name: String,
    /// Gameplay tag, used for exact matching (ground, wall-run volumes)
    pub tag: String,
}

impl SurfaceInfo {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Check whether this surface carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

/// A downward probe hit
#[derive(Debug, Clone)]
pub struct SurfaceHit {
    /// Distance from the character's feet to the hit point
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
    /// The surface that was hit
    pub surface: SurfaceInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tag_is_exact() {
        let surface = SurfaceInfo::new("Floor_01", "Ground");
        assert!(surface.has_tag("Ground"));
        assert!(!surface.has_tag("ground"));
        assert!(!surface.has_tag("Grou"));
    }
}
