//! Bounded replay history of recent query shapes
//!
//! Debug-only collaborator for external visualization: the tree records the
//! shape of each query it runs into a fixed-capacity ring buffer so a host
//! renderer can replay them. Has no effect on query results.

use std::collections::VecDeque;

use crate::geometry::{Aabb, Plane, Ray};

/// Default number of query shapes retained for replay
pub const QUERY_HISTORY_CAPACITY: usize = 16;

/// Shape of a recorded query
#[derive(Debug, Clone)]
pub enum QueryShape {
    /// Box overlap query
    Bounds(Aabb),
    /// Ray query with its maximum distance
    Ray(Ray, f32),
    /// Frustum query plane set
    Planes(Vec<Plane>),
}

/// Fixed-capacity query history; the oldest shape is discarded when full
#[derive(Debug)]
pub struct QueryHistory {
    shapes: VecDeque<QueryShape>,
    capacity: usize,
}

impl QueryHistory {
    /// Create a history retaining up to `capacity` shapes
    pub fn new(capacity: usize) -> Self {
        Self {
            shapes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a query shape, discarding the oldest when at capacity
    pub fn record(&mut self, shape: QueryShape) {
        if self.shapes.len() == self.capacity {
            self.shapes.pop_front();
        }
        self.shapes.push_back(shape);
    }

    /// Recorded shapes, oldest first
    pub fn shapes(&self) -> impl Iterator<Item = &QueryShape> {
        self.shapes.iter()
    }

    /// Number of recorded shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
