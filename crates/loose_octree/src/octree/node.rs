//! Recursive loose octree node
//!
//! Each node covers a region with a tight side length and a loose effective
//! side length (tight length scaled by the looseness factor). Entries are
//! stored at the deepest node whose loose bounds fully contain them; a node
//! holds either zero or exactly eight children, one per octant.

use crate::foundation::math::Vec3;
use crate::geometry::{frustum, Aabb, Plane, Ray};
use crate::octree::OctreeError;

/// Maximum number of directly held entries before a node splits
pub const SPLIT_THRESHOLD: usize = 8;

/// Payload plus the bounds it was inserted with
#[derive(Debug, Clone)]
pub struct OctreeEntry<T> {
    /// Stored payload
    pub payload: T,
    /// World-space bounds the payload was keyed by
    pub bounds: Aabb,
}

/// Single node in the loose octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode<T> {
    /// Center of this node's region
    center: Vec3,

    /// Tight side length, excluding the looseness multiplier
    base_length: f32,

    /// Loose size multiplier, inherited unchanged from the tree
    looseness: f32,

    /// Side length floor below which no further splitting occurs
    min_size: f32,

    /// Effective bounds: the tight volume scaled by looseness
    loose_bounds: Aabb,

    /// Entries stored directly at this level
    entries: Vec<OctreeEntry<T>>,

    /// Child nodes (8 octants), None if this is a leaf
    children: Option<Box<[OctreeNode<T>; 8]>>,
}

impl<T> OctreeNode<T> {
    /// Create a new leaf node
    pub fn new(base_length: f32, min_size: f32, looseness: f32, center: Vec3) -> Self {
        let mut node = Self {
            center,
            base_length,
            looseness,
            min_size,
            loose_bounds: Aabb::from_center_size(center, Vec3::zeros()),
            entries: Vec::new(),
            children: None,
        };
        node.set_values(base_length, min_size, looseness, center);
        node
    }

    /// Reset this node's dimensions, keeping entries and children
    fn set_values(&mut self, base_length: f32, min_size: f32, looseness: f32, center: Vec3) {
        self.base_length = base_length;
        self.min_size = min_size;
        self.looseness = looseness;
        self.center = center;
        self.loose_bounds =
            Aabb::from_center_size(center, Vec3::from_element(looseness * base_length));
    }

    /// Center of this node's region
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Tight side length of this node's region
    pub fn base_length(&self) -> f32 {
        self.base_length
    }

    /// Effective (loose) bounds of this node
    pub fn loose_bounds(&self) -> Aabb {
        self.loose_bounds
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of entries stored directly at this level
    pub fn direct_entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Count entries in this node and all descendants
    pub fn count_entries(&self) -> usize {
        let mut count = self.entries.len();
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                count += child.count_entries();
            }
        }
        count
    }

    /// True if this node or any descendant holds at least one entry
    pub fn has_any_entries(&self) -> bool {
        if !self.entries.is_empty() {
            return true;
        }
        self.children
            .as_ref()
            .is_some_and(|children| children.iter().any(Self::has_any_entries))
    }

    /// Insert a payload with its bounds
    ///
    /// Returns the payload back as `Err` without mutating if the bounds
    /// are not fully contained in this node's loose bounds; the tree grows
    /// the root and retries in that case.
    pub fn add(&mut self, payload: T, bounds: Aabb) -> Result<(), T> {
        if !self.loose_bounds.encapsulates(&bounds) {
            return Err(payload);
        }
        self.sub_add(payload, bounds);
        Ok(())
    }

    /// Recursive placement once containment in this node is established
    fn sub_add(&mut self, payload: T, bounds: Aabb) {
        if self.children.is_none() {
            // Keep absorbing entries while below the split threshold, or
            // forever once children would fall under the size floor.
            if self.entries.len() < SPLIT_THRESHOLD || self.base_length / 2.0 < self.min_size {
                self.entries.push(OctreeEntry { payload, bounds });
                return;
            }
            self.split();
            self.push_entries_down();
        }

        let octant = self.best_fit_child(bounds.center());
        let fits_child = self.child_loose_bounds(octant).encapsulates(&bounds);
        if fits_child {
            if let Some(children) = self.children.as_mut() {
                children[octant].sub_add(payload, bounds);
                return;
            }
        }
        // Straddles a child boundary even under looseness; stays here.
        self.entries.push(OctreeEntry { payload, bounds });
    }

    /// Octant index (0-7) whose region the given point classifies into
    ///
    /// The axis comparators are `<=` on X and Z but `>=` on Y, so
    /// boundary-exact coordinates resolve differently per axis. Entry
    /// placement, targeted removal and shrinking all rely on this exact
    /// tie-break; keep it as-is.
    pub fn best_fit_child(&self, point: Vec3) -> usize {
        (if point.x <= self.center.x { 0 } else { 1 })
            + (if point.y >= self.center.y { 0 } else { 4 })
            + (if point.z <= self.center.z { 0 } else { 2 })
    }

    /// Center of the given octant's child region
    fn child_center(&self, octant: usize) -> Vec3 {
        let quarter = self.base_length / 4.0;
        let x = if octant & 1 == 0 { -quarter } else { quarter };
        let y = if octant & 4 == 0 { quarter } else { -quarter };
        let z = if octant & 2 == 0 { -quarter } else { quarter };
        self.center + Vec3::new(x, y, z)
    }

    /// Loose bounds the given octant's child has, or would have
    fn child_loose_bounds(&self, octant: usize) -> Aabb {
        let side = self.looseness * self.base_length / 2.0;
        Aabb::from_center_size(self.child_center(octant), Vec3::from_element(side))
    }

    /// Subdivide this node into 8 children, one per octant
    fn split(&mut self) {
        if self.children.is_some() {
            return;
        }
        let children = Box::new([
            self.spawn_child(0),
            self.spawn_child(1),
            self.spawn_child(2),
            self.spawn_child(3),
            self.spawn_child(4),
            self.spawn_child(5),
            self.spawn_child(6),
            self.spawn_child(7),
        ]);
        self.children = Some(children);
    }

    /// Create the leaf child covering the given octant
    fn spawn_child(&self, octant: usize) -> Self {
        Self::new(
            self.base_length / 2.0,
            self.min_size,
            self.looseness,
            self.child_center(octant),
        )
    }

    /// Move directly held entries into whichever child fully contains them
    ///
    /// Entries that straddle a child boundary stay at this level permanently.
    fn push_entries_down(&mut self) {
        let mut kept = Vec::new();
        for entry in std::mem::take(&mut self.entries) {
            let octant = self.best_fit_child(entry.bounds.center());
            if self.child_loose_bounds(octant).encapsulates(&entry.bounds) {
                if let Some(children) = self.children.as_mut() {
                    children[octant].sub_add(entry.payload, entry.bounds);
                    continue;
                }
            }
            kept.push(entry);
        }
        self.entries = kept;
    }

    /// Graft a prebuilt set of children onto this node
    ///
    /// Escape hatch used by tree growth. This bypasses the split
    /// invariants, so exactly eight children (one per octant, in octant
    /// index order) must be supplied; anything else is rejected without
    /// mutation.
    pub fn set_children(&mut self, children: Vec<Self>) -> Result<(), OctreeError> {
        let supplied = children.len();
        match <[Self; 8]>::try_from(children) {
            Ok(octants) => {
                self.children = Some(Box::new(octants));
                Ok(())
            }
            Err(_) => {
                let err = OctreeError::InvalidChildSet { supplied };
                log::error!("{err}");
                Err(err)
            }
        }
    }

    /// Check if something in this subtree intersects the given bounds
    pub fn is_colliding(&self, bounds: &Aabb) -> bool {
        if !self.loose_bounds.intersects(bounds) {
            return false;
        }
        if self.entries.iter().any(|entry| entry.bounds.intersects(bounds)) {
            return true;
        }
        if let Some(children) = self.children.as_ref() {
            return children.iter().any(|child| child.is_colliding(bounds));
        }
        false
    }

    /// Check if something in this subtree intersects the given ray
    pub fn is_colliding_ray(&self, ray: &Ray, max_distance: f32) -> bool {
        match self.loose_bounds.intersect_ray(ray) {
            Some(distance) if distance <= max_distance => {}
            _ => return false,
        }
        let entry_hit = self.entries.iter().any(|entry| {
            matches!(entry.bounds.intersect_ray(ray), Some(distance) if distance <= max_distance)
        });
        if entry_hit {
            return true;
        }
        if let Some(children) = self.children.as_ref() {
            return children
                .iter()
                .any(|child| child.is_colliding_ray(ray, max_distance));
        }
        false
    }

    /// Collect every payload whose bounds intersect the given bounds
    pub fn get_colliding<'a>(&'a self, bounds: &Aabb, results: &mut Vec<&'a T>) {
        if !self.loose_bounds.intersects(bounds) {
            return;
        }
        for entry in &self.entries {
            if entry.bounds.intersects(bounds) {
                results.push(&entry.payload);
            }
        }
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.get_colliding(bounds, results);
            }
        }
    }

    /// Collect every payload whose bounds intersect the given ray
    pub fn get_colliding_ray<'a>(&'a self, ray: &Ray, max_distance: f32, results: &mut Vec<&'a T>) {
        match self.loose_bounds.intersect_ray(ray) {
            Some(distance) if distance <= max_distance => {}
            _ => return,
        }
        for entry in &self.entries {
            if matches!(entry.bounds.intersect_ray(ray), Some(distance) if distance <= max_distance)
            {
                results.push(&entry.payload);
            }
        }
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.get_colliding_ray(ray, max_distance, results);
            }
        }
    }

    /// Collect every payload inside or intersecting the given plane set
    pub fn get_within_planes<'a>(&'a self, planes: &[Plane], results: &mut Vec<&'a T>) {
        if !frustum::intersects_aabb(planes, &self.loose_bounds) {
            return;
        }
        for entry in &self.entries {
            if frustum::intersects_aabb(planes, &entry.bounds) {
                results.push(&entry.payload);
            }
        }
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.get_within_planes(planes, results);
            }
        }
    }

    /// Reduce this subtree by a single level if everything fits one octant
    ///
    /// Returns `self` unchanged when the base length is already below twice
    /// `min_length`, when the subtree is empty, or when entries or occupied
    /// children span more than one octant. Otherwise either resizes this
    /// node in place to the occupied octant (leaf case) or promotes the one
    /// occupied child to replace this node, pushing any entries still held
    /// here down into it first. Callers needing maximal shrink call
    /// repeatedly; each call reduces at most one level.
    pub fn shrink_if_possible(mut self, min_length: f32) -> Self {
        if self.base_length < 2.0 * min_length {
            return self;
        }
        if self.entries.is_empty() && self.children.is_none() {
            return self;
        }

        // All direct entries must classify into the same octant and fit
        // entirely inside that octant's loose child bounds.
        let mut best_fit: Option<usize> = None;
        for entry in &self.entries {
            let octant = self.best_fit_child(entry.bounds.center());
            if best_fit.is_some_and(|current| current != octant) {
                return self;
            }
            if !self.child_loose_bounds(octant).encapsulates(&entry.bounds) {
                return self;
            }
            best_fit = Some(octant);
        }

        // At most one child may hold anything, and its octant must match
        // the one the direct entries picked.
        if let Some(children) = self.children.as_ref() {
            let mut occupied = false;
            for (octant, child) in children.iter().enumerate() {
                if !child.has_any_entries() {
                    continue;
                }
                if occupied {
                    return self;
                }
                if best_fit.is_some_and(|current| current != octant) {
                    return self;
                }
                occupied = true;
                best_fit = Some(octant);
            }
        }

        let Some(octant) = best_fit else {
            // Children exist but nothing is stored anywhere.
            return self;
        };

        if self.children.is_none() {
            // No children: adopt the octant's dimensions in place.
            let center = self.child_center(octant);
            let half = self.base_length / 2.0;
            self.set_values(half, self.min_size, self.looseness, center);
            return self;
        }

        // Promote the occupied child as the new subtree root. Entries still
        // held at this level were verified to fit its loose bounds, so they
        // move down rather than being dropped with the old root.
        let entries = std::mem::take(&mut self.entries);
        let Some(children) = self.children.take() else {
            return self;
        };
        let mut promoted = None;
        for (index, child) in (*children).into_iter().enumerate() {
            if index == octant {
                promoted = Some(child);
            }
        }
        let Some(mut promoted) = promoted else {
            return self;
        };
        for entry in entries {
            promoted.sub_add(entry.payload, entry.bounds);
        }
        promoted
    }

    /// Merge eligibility: no child is itself split, and the combined entry
    /// count of this node plus all children fits the split threshold
    fn should_merge(&self) -> bool {
        let Some(children) = self.children.as_ref() else {
            return false;
        };
        let mut total = self.entries.len();
        for child in children.iter() {
            if child.children.is_some() {
                // Never chain merges transitively in one pass.
                return false;
            }
            total += child.entries.len();
        }
        total <= SPLIT_THRESHOLD
    }

    /// Hoist every child entry to this level and discard the children
    fn merge(&mut self) {
        if let Some(children) = self.children.take() {
            for mut child in *children {
                self.entries.append(&mut child.entries);
            }
        }
    }
}

impl<T: PartialEq> OctreeNode<T> {
    /// Remove the single entry whose payload equals the given one
    ///
    /// Searches this node's direct entries first, then recurses into
    /// children in octant order until one reports success. Each payload is
    /// assumed to occur at most once across the whole tree.
    pub fn remove(&mut self, payload: &T) -> bool {
        let mut removed = false;
        if let Some(index) = self.entries.iter().position(|entry| entry.payload == *payload) {
            self.entries.remove(index);
            removed = true;
        } else if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.remove(payload) {
                    removed = true;
                    break;
                }
            }
        }

        if removed && self.children.is_some() && self.should_merge() {
            self.merge();
        }
        removed
    }

    /// Remove an entry, descending along the path its bounds dictate
    ///
    /// Rejects without searching if the bounds are not contained in this
    /// node's loose bounds. Descent follows the best-fit octant of the
    /// bounds' center only, which is valid because entries are always
    /// stored on the path their own bounds classify to.
    pub fn remove_with_bounds(&mut self, payload: &T, bounds: Aabb) -> bool {
        if !self.loose_bounds.encapsulates(&bounds) {
            return false;
        }
        self.sub_remove(payload, bounds)
    }

    fn sub_remove(&mut self, payload: &T, bounds: Aabb) -> bool {
        let mut removed = false;
        if let Some(index) = self.entries.iter().position(|entry| entry.payload == *payload) {
            self.entries.remove(index);
            removed = true;
        } else {
            let octant = self.best_fit_child(bounds.center());
            if let Some(children) = self.children.as_mut() {
                removed = children[octant].sub_remove(payload, bounds);
            }
        }

        if removed && self.children.is_some() && self.should_merge() {
            self.merge();
        }
        removed
    }
}

#[cfg(feature = "debug-draw")]
impl<T> OctreeNode<T> {
    /// Collect the loose bounds of every node in this subtree
    pub fn collect_node_bounds(&self, out: &mut Vec<Aabb>) {
        out.push(self.loose_bounds);
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.collect_node_bounds(out);
            }
        }
    }

    /// Collect the bounds of every entry in this subtree
    pub fn collect_entry_bounds(&self, out: &mut Vec<Aabb>) {
        for entry in &self.entries {
            out.push(entry.bounds);
        }
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.collect_entry_bounds(out);
            }
        }
    }
}

#[cfg(test)]
impl<T> OctreeNode<T> {
    /// Containment invariant: every directly stored entry fits this node's
    /// loose bounds, recursively.
    pub(crate) fn containment_holds(&self) -> bool {
        if self
            .entries
            .iter()
            .any(|entry| !self.loose_bounds.encapsulates(&entry.bounds))
        {
            return false;
        }
        match self.children.as_ref() {
            Some(children) => children.iter().all(Self::containment_holds),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tiny_box(center: Vec3) -> Aabb {
        Aabb::from_center_size(center, Vec3::from_element(0.25))
    }

    #[test]
    fn test_add_rejects_outside_bounds() {
        let mut node: OctreeNode<i32> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        let far = tiny_box(Vec3::new(50.0, 0.0, 0.0));

        assert_eq!(node.add(1, far), Err(1));
        assert_eq!(node.count_entries(), 0);
    }

    #[test]
    fn test_split_triggers_on_ninth_entry() {
        let mut node: OctreeNode<i32> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        for i in 0..8 {
            let bounds = tiny_box(Vec3::new(2.0, 2.0, 2.0));
            assert!(node.add(i, bounds).is_ok());
        }
        assert!(node.is_leaf());

        assert!(node.add(8, tiny_box(Vec3::new(2.0, 2.0, 2.0))).is_ok());
        assert!(!node.is_leaf());
        assert_eq!(node.count_entries(), 9);
        assert!(node.containment_holds());
    }

    #[test]
    fn test_no_split_below_min_size() {
        // Children would be 0.5 wide, under the 1.0 floor: absorb forever.
        let mut node: OctreeNode<i32> = OctreeNode::new(1.0, 1.0, 1.2, Vec3::zeros());
        for i in 0..20 {
            let bounds = Aabb::from_center_size(Vec3::zeros(), Vec3::from_element(0.1));
            assert!(node.add(i, bounds).is_ok());
        }
        assert!(node.is_leaf());
        assert_eq!(node.direct_entry_count(), 20);
    }

    #[test]
    fn test_straddling_entry_stays_at_parent() {
        let mut node: OctreeNode<i32> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        for i in 0..8 {
            assert!(node.add(i, tiny_box(Vec3::new(2.0, 2.0, 2.0))).is_ok());
        }
        // Too large for any child even with looseness; stored at the root
        // level after the split.
        let straddler = Aabb::from_center_size(Vec3::zeros(), Vec3::from_element(8.0));
        assert!(node.add(100, straddler).is_ok());

        assert!(!node.is_leaf());
        assert_eq!(node.direct_entry_count(), 1);
        assert!(node.containment_holds());
    }

    #[test]
    fn test_best_fit_child_axis_asymmetry() {
        let node: OctreeNode<i32> = OctreeNode::new(10.0, 1.0, 1.0, Vec3::zeros());

        // Boundary-exact coordinates: X and Z classify low on <=, Y
        // classifies low on >=.
        assert_eq!(node.best_fit_child(Vec3::zeros()), 0);
        assert_eq!(node.best_fit_child(Vec3::new(0.1, 0.0, 0.0)), 1);
        assert_eq!(node.best_fit_child(Vec3::new(0.0, -0.1, 0.0)), 4);
        assert_eq!(node.best_fit_child(Vec3::new(0.0, 0.0, 0.1)), 2);
        assert_eq!(node.best_fit_child(Vec3::new(0.1, -0.1, 0.1)), 7);
    }

    #[test]
    fn test_remove_by_identity() {
        let mut node: OctreeNode<&str> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        assert!(node.add("a", tiny_box(Vec3::new(1.0, 1.0, 1.0))).is_ok());
        assert!(node.add("b", tiny_box(Vec3::new(-1.0, 1.0, 1.0))).is_ok());

        assert!(node.remove(&"a"));
        assert!(!node.remove(&"a"));
        assert_eq!(node.count_entries(), 1);
    }

    #[test]
    fn test_remove_with_bounds_rejects_outside() {
        let mut node: OctreeNode<&str> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        assert!(node.add("a", tiny_box(Vec3::new(1.0, 1.0, 1.0))).is_ok());

        let outside = tiny_box(Vec3::new(50.0, 0.0, 0.0));
        assert!(!node.remove_with_bounds(&"a", outside));
        assert_eq!(node.count_entries(), 1);
    }

    #[test]
    fn test_remove_with_bounds_descends_best_fit_path() {
        let mut node: OctreeNode<i32> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        for i in 0..9 {
            assert!(node.add(i, tiny_box(Vec3::new(2.0, 2.0, 2.0))).is_ok());
        }
        assert!(!node.is_leaf());

        assert!(node.remove_with_bounds(&4, tiny_box(Vec3::new(2.0, 2.0, 2.0))));
        assert_eq!(node.count_entries(), 8);
    }

    #[test]
    fn test_merge_after_removal() {
        let mut node: OctreeNode<i32> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        // Eight cluster in one octant, then a straddler forces the split
        // while staying at the root level: 9 entries, no grandchildren.
        for i in 0..8 {
            assert!(node.add(i, tiny_box(Vec3::new(2.0, 2.0, 2.0))).is_ok());
        }
        let straddler = Aabb::from_center_size(Vec3::zeros(), Vec3::from_element(8.0));
        assert!(node.add(100, straddler).is_ok());
        assert!(!node.is_leaf());

        // Dropping to 8 total collapses the children back into the node.
        assert!(node.remove(&3));
        assert!(node.is_leaf());
        assert_eq!(node.count_entries(), 8);
        assert!(node.containment_holds());
    }

    #[test]
    fn test_set_children_validates_count() {
        let mut node: OctreeNode<i32> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        let short: Vec<OctreeNode<i32>> = (0..3)
            .map(|_| OctreeNode::new(5.0, 1.0, 1.2, Vec3::zeros()))
            .collect();

        assert_eq!(
            node.set_children(short),
            Err(OctreeError::InvalidChildSet { supplied: 3 })
        );
        assert!(node.is_leaf());
    }

    #[test]
    fn test_queries_on_empty_node() {
        let node: OctreeNode<i32> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        let probe = Aabb::from_center_size(Vec3::zeros(), Vec3::from_element(4.0));
        let ray = Ray::new(Vec3::new(-20.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        assert!(!node.is_colliding(&probe));
        assert!(!node.is_colliding_ray(&ray, f32::INFINITY));

        let mut results = Vec::new();
        node.get_colliding(&probe, &mut results);
        assert!(results.is_empty());
    }

    #[test]
    fn test_ray_query_respects_max_distance() {
        let mut node: OctreeNode<&str> = OctreeNode::new(10.0, 1.0, 1.2, Vec3::zeros());
        assert!(node.add("hit", tiny_box(Vec3::new(3.0, 0.0, 0.0))).is_ok());

        let ray = Ray::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(node.is_colliding_ray(&ray, f32::INFINITY));
        // Entry's near face sits 12.875 units along the ray.
        assert!(!node.is_colliding_ray(&ray, 5.0));

        let mut results = Vec::new();
        node.get_colliding_ray(&ray, f32::INFINITY, &mut results);
        assert_eq!(results, vec![&"hit"]);
    }

    #[test]
    fn test_shrink_leaf_resizes_in_place() {
        let mut node: OctreeNode<i32> = OctreeNode::new(4.0, 1.0, 1.0, Vec3::zeros());
        assert!(node
            .add(1, Aabb::from_center_size(Vec3::new(1.0, 1.0, 1.0), Vec3::from_element(0.2)))
            .is_ok());

        let node = node.shrink_if_possible(1.0);
        assert_relative_eq!(node.base_length(), 2.0);
        assert_relative_eq!(node.center(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(node.count_entries(), 1);
        assert!(node.containment_holds());
    }

    #[test]
    fn test_shrink_aborts_when_entries_span_octants() {
        let mut node: OctreeNode<i32> = OctreeNode::new(4.0, 1.0, 1.0, Vec3::zeros());
        assert!(node.add(1, tiny_box(Vec3::new(1.0, 1.0, 1.0))).is_ok());
        assert!(node.add(2, tiny_box(Vec3::new(-1.0, 1.0, 1.0))).is_ok());

        let node = node.shrink_if_possible(1.0);
        assert_relative_eq!(node.base_length(), 4.0);
        assert_eq!(node.count_entries(), 2);
    }

    #[test]
    fn test_shrink_respects_min_length_floor() {
        let mut node: OctreeNode<i32> = OctreeNode::new(4.0, 1.0, 1.0, Vec3::zeros());
        assert!(node.add(1, tiny_box(Vec3::new(1.0, 1.0, 1.0))).is_ok());

        // Already below twice the allowed minimum: unchanged.
        let node = node.shrink_if_possible(3.0);
        assert_relative_eq!(node.base_length(), 4.0);
    }

    #[test]
    fn test_shrink_promotes_occupied_child() {
        let mut node: OctreeNode<i32> = OctreeNode::new(8.0, 1.0, 1.0, Vec3::zeros());
        // Nine entries in one octant: split, everything lands in that child.
        for i in 0..9 {
            assert!(node.add(i, tiny_box(Vec3::new(2.0, 2.0, 2.0))).is_ok());
        }
        assert!(!node.is_leaf());

        let node = node.shrink_if_possible(1.0);
        assert_relative_eq!(node.base_length(), 4.0);
        assert_relative_eq!(node.center(), Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(node.count_entries(), 9);
        assert!(node.containment_holds());
    }
}
