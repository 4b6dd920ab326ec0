//! Tree-level orchestration over the recursive node structure
//!
//! The tree owns the root node and provides the public query/mutation
//! surface. It handles the two operations a node cannot perform on itself:
//! growing the whole structure when an inserted object falls outside the
//! current bounds, and replacing the root with a smaller node (or a former
//! child) when everything fits inside a reduced volume.

use crate::config::OctreeConfig;
use crate::foundation::math::Vec3;
use crate::geometry::{Aabb, Frustum, Plane, Ray};
use crate::octree::node::OctreeNode;
use crate::octree::OctreeError;

#[cfg(feature = "debug-draw")]
use std::cell::RefCell;

#[cfg(feature = "debug-draw")]
use crate::octree::history::{QueryHistory, QueryShape, QUERY_HISTORY_CAPACITY};

/// Maximum number of root doublings attempted for a single insertion
pub const GROW_ATTEMPT_LIMIT: u32 = 20;

/// Dynamic loose octree storing payloads keyed by bounding boxes
///
/// Mutating calls require exclusive access; read-only queries against a
/// tree that is not being mutated are safe to run concurrently.
#[derive(Debug)]
pub struct LooseOctree<T> {
    /// Root node; replaced wholesale on grow and shrink
    root: OctreeNode<T>,

    /// Originally configured size; shrink never reduces below this
    initial_size: f32,

    /// Minimum node side length, inherited by every node
    min_size: f32,

    /// Loose size multiplier, inherited by every node
    looseness: f32,

    /// Authoritative count of live entries across all nodes
    count: usize,

    /// Replay buffer of recent query shapes. Interior mutability keeps the
    /// query surface `&self`; with this feature enabled the tree stops
    /// being `Sync`.
    #[cfg(feature = "debug-draw")]
    history: RefCell<QueryHistory>,
}

impl<T> LooseOctree<T> {
    /// Create a tree centered at the given point
    ///
    /// The configuration is clamped into its valid range first (reported
    /// through the warning channel, never fatal).
    pub fn new(config: OctreeConfig, center: Vec3) -> Self {
        let config = config.validated();
        Self {
            root: OctreeNode::new(
                config.initial_size,
                config.min_node_size,
                config.looseness,
                center,
            ),
            initial_size: config.initial_size,
            min_size: config.min_node_size,
            looseness: config.looseness,
            count: 0,
            #[cfg(feature = "debug-draw")]
            history: RefCell::new(QueryHistory::new(QUERY_HISTORY_CAPACITY)),
        }
    }

    /// Number of live entries stored in the tree
    pub fn count(&self) -> usize {
        self.count
    }

    /// Insert a payload with its bounds, growing the tree as needed
    ///
    /// The root doubles toward the rejected bounds until they fit, bounded
    /// by [`GROW_ATTEMPT_LIMIT`]; exceeding the ceiling aborts without
    /// inserting and without touching the count.
    pub fn add(&mut self, payload: T, bounds: Aabb) -> Result<(), OctreeError> {
        let mut payload = payload;
        let mut attempts = 0;
        loop {
            match self.root.add(payload, bounds) {
                Ok(()) => {
                    self.count += 1;
                    return Ok(());
                }
                Err(rejected) => {
                    attempts += 1;
                    if attempts > GROW_ATTEMPT_LIMIT {
                        let err = OctreeError::RunawayGrowth { attempts: attempts - 1 };
                        log::error!("{err}");
                        return Err(err);
                    }
                    payload = rejected;
                    self.grow(bounds.center() - self.root.center());
                }
            }
        }
    }

    /// Double the root toward the given direction
    ///
    /// The new root is centered so the old root occupies exactly one of its
    /// octants. A non-empty old root is preserved as that octant's child
    /// alongside seven explicitly built empty siblings; an empty old root
    /// is simply discarded for a larger empty one.
    fn grow(&mut self, direction: Vec3) {
        let x_direction = if direction.x >= 0.0 { 1.0 } else { -1.0 };
        let y_direction = if direction.y >= 0.0 { 1.0 } else { -1.0 };
        let z_direction = if direction.z >= 0.0 { 1.0 } else { -1.0 };

        let old_length = self.root.base_length();
        let half = old_length / 2.0;
        let new_length = old_length * 2.0;
        let new_center = self.root.center()
            + Vec3::new(x_direction * half, y_direction * half, z_direction * half);

        log::debug!(
            "growing root: length {old_length} -> {new_length}, new center {new_center:?}"
        );

        let old_root = std::mem::replace(
            &mut self.root,
            OctreeNode::new(new_length, self.min_size, self.looseness, new_center),
        );

        if !old_root.has_any_entries() {
            // Nothing to preserve; the larger empty root suffices.
            return;
        }

        let root_octant = self.root.best_fit_child(old_root.center());
        let mut old_root = Some(old_root);
        let mut children = Vec::with_capacity(8);
        for octant in 0..8 {
            if octant == root_octant {
                if let Some(old) = old_root.take() {
                    children.push(old);
                }
                continue;
            }
            let x_sign = if octant % 2 == 0 { -1.0 } else { 1.0 };
            let y_sign = if octant > 3 { -1.0 } else { 1.0 };
            let z_sign = if octant < 2 || (octant > 3 && octant < 6) { -1.0 } else { 1.0 };
            children.push(OctreeNode::new(
                old_length,
                self.min_size,
                self.looseness,
                new_center + Vec3::new(x_sign * half, y_sign * half, z_sign * half),
            ));
        }

        if let Err(err) = self.root.set_children(children) {
            log::error!("growth produced a malformed child set: {err}");
        }
    }

    /// Replace the root with a shrunk equivalent when possible
    ///
    /// A single level per call; never reduces below the originally
    /// configured size.
    fn shrink(&mut self) {
        let placeholder = OctreeNode::new(
            self.initial_size,
            self.min_size,
            self.looseness,
            self.root.center(),
        );
        let old_length = self.root.base_length();
        let root = std::mem::replace(&mut self.root, placeholder);
        self.root = root.shrink_if_possible(self.initial_size);
        if self.root.base_length() < old_length {
            log::debug!(
                "shrunk root: length {old_length} -> {}",
                self.root.base_length()
            );
        }
    }

    /// Check if something in the tree intersects the given bounds
    pub fn is_colliding(&self, bounds: &Aabb) -> bool {
        #[cfg(feature = "debug-draw")]
        self.history.borrow_mut().record(QueryShape::Bounds(*bounds));
        self.root.is_colliding(bounds)
    }

    /// Check if something in the tree intersects the given ray
    pub fn is_colliding_ray(&self, ray: &Ray, max_distance: f32) -> bool {
        #[cfg(feature = "debug-draw")]
        self.history.borrow_mut().record(QueryShape::Ray(*ray, max_distance));
        self.root.is_colliding_ray(ray, max_distance)
    }

    /// Get all payloads whose bounds intersect the given bounds
    pub fn get_colliding(&self, bounds: &Aabb) -> Vec<&T> {
        #[cfg(feature = "debug-draw")]
        self.history.borrow_mut().record(QueryShape::Bounds(*bounds));
        let mut results = Vec::new();
        self.root.get_colliding(bounds, &mut results);
        results
    }

    /// Get all payloads whose bounds intersect the given ray
    pub fn get_colliding_ray(&self, ray: &Ray, max_distance: f32) -> Vec<&T> {
        #[cfg(feature = "debug-draw")]
        self.history.borrow_mut().record(QueryShape::Ray(*ray, max_distance));
        let mut results = Vec::new();
        self.root.get_colliding_ray(ray, max_distance, &mut results);
        results
    }

    /// Get all payloads inside or intersecting the given plane set
    pub fn get_within_planes(&self, planes: &[Plane]) -> Vec<&T> {
        #[cfg(feature = "debug-draw")]
        self.history.borrow_mut().record(QueryShape::Planes(planes.to_vec()));
        let mut results = Vec::new();
        self.root.get_within_planes(planes, &mut results);
        results
    }

    /// Get all payloads inside or intersecting the given frustum
    pub fn get_within_frustum(&self, frustum: &Frustum) -> Vec<&T> {
        self.get_within_planes(frustum.planes())
    }

    /// Bounds enclosing everything currently stored in the tree
    ///
    /// This is the root's loose bounds; every entry in the tree is fully
    /// contained in it.
    pub fn max_bounds(&self) -> Aabb {
        self.root.loose_bounds()
    }
}

impl<T: PartialEq> LooseOctree<T> {
    /// Remove the single entry whose payload equals the given one
    ///
    /// Searches the whole tree. Returns false with no side effects if the
    /// payload is absent. A successful removal decrements the count and
    /// applies one shrink step.
    pub fn remove(&mut self, payload: &T) -> bool {
        let removed = self.root.remove(payload);
        if removed {
            self.count -= 1;
            self.shrink();
        }
        removed
    }

    /// Remove an entry, descending only along the path its bounds dictate
    ///
    /// Faster than [`Self::remove`] when the insertion bounds are known.
    pub fn remove_with_bounds(&mut self, payload: &T, bounds: Aabb) -> bool {
        let removed = self.root.remove_with_bounds(payload, bounds);
        if removed {
            self.count -= 1;
            self.shrink();
        }
        removed
    }
}

#[cfg(feature = "debug-draw")]
impl<T> LooseOctree<T> {
    /// Loose bounds of every node, for external debug rendering
    pub fn collect_node_bounds(&self) -> Vec<Aabb> {
        let mut out = Vec::new();
        self.root.collect_node_bounds(&mut out);
        out
    }

    /// Bounds of every stored entry, for external debug rendering
    pub fn collect_entry_bounds(&self) -> Vec<Aabb> {
        let mut out = Vec::new();
        self.root.collect_entry_bounds(&mut out);
        out
    }

    /// Snapshot of the recent query shapes, oldest first
    pub fn query_history(&self) -> Vec<QueryShape> {
        self.history.borrow().shapes().cloned().collect()
    }
}

#[cfg(test)]
impl<T> LooseOctree<T> {
    /// Root access for invariant checks in tests
    pub(crate) fn root(&self) -> &OctreeNode<T> {
        &self.root
    }
}
