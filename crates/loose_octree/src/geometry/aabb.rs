//! Axis-aligned bounding box

use crate::foundation::math::Vec3;
use crate::geometry::Ray;

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half-extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create an AABB centered at a point with given full side lengths
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_extents(center, size * 0.5)
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size of the AABB per axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Check if this AABB fully contains another AABB
    ///
    /// Both the minimum and maximum corners of `other` must lie within
    /// this box. Shared faces count as contained.
    pub fn encapsulates(&self, other: &Aabb) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the distance to the entry point if the ray intersects, None
    /// otherwise. A ray starting inside the box reports distance 0.
    /// Based on "An Efficient and Robust Ray–Box Intersection Algorithm"
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vec3::new(
            if ray.direction.x != 0.0 { 1.0 / ray.direction.x } else { f32::INFINITY },
            if ray.direction.y != 0.0 { 1.0 / ray.direction.y } else { f32::INFINITY },
            if ray.direction.z != 0.0 { 1.0 / ray.direction.z } else { f32::INFINITY },
        );

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Ray intersects if tmax >= tmin and tmax >= 0
        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_and_extents() {
        let aabb = Aabb::new(Vec3::new(-2.0, -4.0, -6.0), Vec3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(aabb.center(), Vec3::zeros());
        assert_relative_eq!(aabb.extents(), Vec3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(aabb.size(), Vec3::new(4.0, 8.0, 12.0));
    }

    #[test]
    fn test_from_center_size_round_trip() {
        let aabb = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 4.0, 4.0));
        assert_relative_eq!(aabb.min, Vec3::new(-1.0, 0.0, 1.0));
        assert_relative_eq!(aabb.max, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_intersects() {
        let a = Aabb::new(Vec3::zeros(), Vec3::new(10.0, 10.0, 10.0));
        let b = Aabb::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(15.0, 15.0, 15.0));
        let c = Aabb::new(Vec3::new(11.0, 11.0, 11.0), Vec3::new(20.0, 20.0, 20.0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));

        // Touching faces count as intersecting
        let d = Aabb::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(20.0, 10.0, 10.0));
        assert!(a.intersects(&d));
    }

    #[test]
    fn test_encapsulates() {
        let outer = Aabb::new(Vec3::zeros(), Vec3::new(10.0, 10.0, 10.0));
        let inner = Aabb::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(8.0, 8.0, 8.0));
        let straddling = Aabb::new(Vec3::new(8.0, 8.0, 8.0), Vec3::new(12.0, 12.0, 12.0));

        assert!(outer.encapsulates(&inner));
        assert!(!inner.encapsulates(&outer));
        assert!(!outer.encapsulates(&straddling));

        // Shared faces still count as contained
        assert!(outer.encapsulates(&outer));
    }

    #[test]
    fn test_intersect_ray_hit() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        let distance = aabb.intersect_ray(&ray).unwrap();
        assert_relative_eq!(distance, 4.0);
    }

    #[test]
    fn test_intersect_ray_miss() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Pointing away from the box
        let away = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        assert!(aabb.intersect_ray(&away).is_none());

        // Parallel to the box but offset
        let offset = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(aabb.intersect_ray(&offset).is_none());
    }

    #[test]
    fn test_intersect_ray_from_inside() {
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));

        assert_relative_eq!(aabb.intersect_ray(&ray).unwrap(), 0.0);
    }
}
