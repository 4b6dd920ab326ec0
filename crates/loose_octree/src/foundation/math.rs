//! Math utilities and types
//!
//! Provides the fundamental vector type shared by the geometry primitives
//! and the octree core.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;
