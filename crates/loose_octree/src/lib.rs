//! # Loose Octree
//!
//! A dynamic loose octree: a spatial index storing arbitrary payloads keyed
//! by axis-aligned bounding boxes, answering containment and intersection
//! queries over large, mutable sets of bounded objects faster than a linear
//! scan.
//!
//! Each node has a "tight" region and a "loose" effective region (tight side
//! length scaled by a looseness factor). The overlap between sibling loose
//! regions lets objects sit fully inside a single node far more often than a
//! strict octree allows, which keeps insertions and removals cheap while
//! objects move every frame.
//!
//! ## Quick Start
//!
//! ```rust
//! use loose_octree::prelude::*;
//!
//! let config = OctreeConfig {
//!     initial_size: 10.0,
//!     min_node_size: 1.0,
//!     looseness: 1.2,
//! };
//! let mut tree = LooseOctree::new(config, Vec3::zeros());
//!
//! let bounds = Aabb::from_center_size(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
//! tree.add("probe", bounds)?;
//!
//! assert_eq!(tree.count(), 1);
//! assert_eq!(tree.get_colliding(&bounds), vec![&"probe"]);
//!
//! assert!(tree.remove(&"probe"));
//! assert_eq!(tree.count(), 0);
//! # Ok::<(), loose_octree::OctreeError>(())
//! ```
//!
//! ## Scope
//!
//! The structure is single-threaded: mutating calls require exclusive
//! access, while read-only queries against a tree that is not being mutated
//! are safe to run concurrently. There is no balancing guarantee beyond the
//! minimum node size floor, and no nearest-neighbor or ranked proximity
//! queries: only boolean and enumerate-style overlap queries.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod geometry;
pub mod octree;

pub use config::{ConfigError, OctreeConfig};
pub use octree::{LooseOctree, OctreeError, OctreeNode};

/// Common imports for library users
pub mod prelude {
    pub use crate::config::OctreeConfig;
    pub use crate::foundation::math::Vec3;
    pub use crate::geometry::{Aabb, Frustum, Plane, Ray};
    pub use crate::octree::{LooseOctree, OctreeError};
}
