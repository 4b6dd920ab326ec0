//! Clipping planes and frustum tests for visibility queries

use crate::foundation::math::Vec3;
use crate::geometry::Aabb;

/// Plane defined by normal and distance from origin
///
/// A point is on the inside of the plane when its signed distance is
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (should be normalized)
    pub normal: Vec3,
    /// Signed distance from the origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from a normal and a distance
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Signed distance from the plane to a point
    ///
    /// Positive on the inside of the plane, negative on the outside.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }
}

/// Check if an AABB is inside or intersects the volume bounded by a plane set
///
/// For each plane the AABB's corner furthest along the plane normal is
/// tested; if that corner is outside any plane the whole box is outside.
/// The test is conservative for volumes with fewer than six planes.
pub fn intersects_aabb(planes: &[Plane], aabb: &Aabb) -> bool {
    for plane in planes {
        // Get the point on the AABB closest to the inside of the plane
        let mut p = aabb.min;
        if plane.normal.x >= 0.0 { p.x = aabb.max.x; }
        if plane.normal.y >= 0.0 { p.y = aabb.max.y; }
        if plane.normal.z >= 0.0 { p.z = aabb.max.z; }

        // If this point is outside the plane, the entire AABB is outside
        if plane.distance_to_point(p) < 0.0 {
            return false;
        }
    }

    true
}

/// Frustum for visibility culling
///
/// Producing the plane set from a viewer/camera abstraction is the host
/// engine's job; the core only consumes the six planes.
#[derive(Debug, Clone)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from six planes (left, right, top, bottom, near, far)
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Get the frustum's planes
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Check if an AABB is inside or intersects the frustum
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        intersects_aabb(&self.planes, aabb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Six inward-facing planes forming the cube [-half, half]^3
    fn cube_planes(half: f32) -> [Plane; 6] {
        [
            Plane::new(Vec3::new(1.0, 0.0, 0.0), half),
            Plane::new(Vec3::new(-1.0, 0.0, 0.0), half),
            Plane::new(Vec3::new(0.0, 1.0, 0.0), half),
            Plane::new(Vec3::new(0.0, -1.0, 0.0), half),
            Plane::new(Vec3::new(0.0, 0.0, 1.0), half),
            Plane::new(Vec3::new(0.0, 0.0, -1.0), half),
        ]
    }

    #[test]
    fn test_distance_to_point() {
        let plane = Plane::new(Vec3::new(1.0, 0.0, 0.0), 5.0);
        assert_relative_eq!(plane.distance_to_point(Vec3::zeros()), 5.0);
        assert_relative_eq!(plane.distance_to_point(Vec3::new(-5.0, 1.0, 2.0)), 0.0);
        assert!(plane.distance_to_point(Vec3::new(-8.0, 0.0, 0.0)) < 0.0);
    }

    #[test]
    fn test_aabb_inside_planes() {
        let frustum = Frustum::new(cube_planes(5.0));
        let inside = Aabb::from_center_size(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        assert!(frustum.intersects_aabb(&inside));
    }

    #[test]
    fn test_aabb_straddling_planes() {
        let frustum = Frustum::new(cube_planes(5.0));
        let straddling = Aabb::from_center_size(Vec3::new(5.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        assert!(frustum.intersects_aabb(&straddling));
    }

    #[test]
    fn test_aabb_outside_planes() {
        let frustum = Frustum::new(cube_planes(5.0));
        let outside = Aabb::from_center_size(Vec3::new(8.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        assert!(!frustum.intersects_aabb(&outside));
    }
}
