//! Ray type for ray-cast queries

use crate::foundation::math::Vec3;

/// Ray defined by an origin and a direction
///
/// Intersection distances are reported in units of the direction's length,
/// so pass a normalized direction when distances should be world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vec3,
    /// Ray direction (not required to be normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point at a given distance along the ray
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}
