//! Geometry primitives for spatial queries
//!
//! Provides the bounding-volume and query-shape types the octree core
//! traverses against: axis-aligned bounding boxes, rays, and clipping
//! planes. Host engines with their own bounding-volume types convert at
//! the boundary; the core only relies on the operations exposed here.

pub mod aabb;
pub mod frustum;
pub mod ray;

pub use aabb::Aabb;
pub use frustum::{Frustum, Plane};
pub use ray::Ray;
