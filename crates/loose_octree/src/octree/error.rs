//! Error kinds reported by octree construction and mutation paths
//!
//! Queries never fail; the error surface covers only the three abort or
//! clamp cases, keeping the hot paths exception-free.

/// Errors reported by octree construction and mutation
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum OctreeError {
    /// Insertion kept failing to fit after repeated root doublings
    #[error("add aborted after {attempts} growth attempts; bounds never fit the root")]
    RunawayGrowth {
        /// Number of growth attempts made before giving up
        attempts: u32,
    },

    /// A manual child graft did not supply exactly eight children
    #[error("child graft requires exactly 8 children, got {supplied}")]
    InvalidChildSet {
        /// Number of children supplied
        supplied: usize,
    },

    /// Minimum node size exceeded the initial world size and was clamped
    #[error("minimum node size {min_size} exceeds initial size {initial_size}; clamping to initial size")]
    MinSizeClamped {
        /// Configured minimum node size
        min_size: f32,
        /// Configured initial world size
        initial_size: f32,
    },
}
