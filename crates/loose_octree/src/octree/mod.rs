//! Dynamic loose octree core
//!
//! Two components, leaf-first: [`OctreeNode`] implements the recursive
//! region structure (insertion, removal, all query traversals, splitting,
//! merging, single-step size reduction), and [`LooseOctree`] owns the root
//! node and orchestrates the operations a node cannot perform on itself
//! (growing the whole structure, replacing the root when shrinking).

mod error;
pub mod node;
pub mod tree;

#[cfg(feature = "debug-draw")]
pub mod history;

pub use error::OctreeError;
pub use node::{OctreeEntry, OctreeNode, SPLIT_THRESHOLD};
pub use tree::{LooseOctree, GROW_ATTEMPT_LIMIT};

#[cfg(feature = "debug-draw")]
pub use history::{QueryHistory, QueryShape, QUERY_HISTORY_CAPACITY};

#[cfg(test)]
mod tests;
