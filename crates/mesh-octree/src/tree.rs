//! The octree itself.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::Point3;
use tracing::{debug, error};

use crate::bounds::Aabb;
use crate::element::SpatialElement;

/// Subdivision stops at this depth; a leaf at the cap may hold more than
/// `max_elements`.
const MAX_SUBDIVISION_DEPTH: u32 = 32;

/// One entry in the element slab. The bounding box and centroid are computed
/// once at insertion and cached.
struct Entry<T> {
    element: T,
    bbox: Aabb,
    centroid: Point3<f64>,
}

/// One octant bucket. Children come in groups of 8 contiguous slots, so a
/// single index identifies the whole group; `None` marks a leaf.
struct Bucket {
    bounds: Aabb,
    depth: u32,
    first_child: Option<usize>,
    /// Elements placed here by centroid. Non-empty only on leaves.
    exact: Vec<usize>,
    /// Elements registered here by bounding-box overlap during `arrange`.
    loose: Vec<usize>,
}

impl Bucket {
    fn leaf(bounds: Aabb, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            first_child: None,
            exact: Vec::new(),
            loose: Vec::new(),
        }
    }
}

/// A point-location index over elements with a spatial footprint.
///
/// Buckets live in an arena `Vec` and elements in a slab, so the whole
/// structure frees in one pass when dropped. Each element is placed in
/// exactly one leaf by its centroid at [`Self::insert`] time; a later
/// [`Self::arrange`] pass additionally registers every element in each leaf
/// its bounding box overlaps, which is what makes [`Self::search_all`]
/// complete for elements straddling bucket boundaries.
///
/// Mutation takes `&mut self`, so a single writer is enforced statically.
/// [`Self::search`] and [`Self::search_all`] take `&self` and may run
/// concurrently from multiple threads.
///
/// # Example
///
/// ```
/// use mesh_octree::{Aabb, Octree, SpatialElement};
/// use nalgebra::{Point3, Vector3};
///
/// struct Cell(Aabb);
///
/// impl SpatialElement for Cell {
///     fn bounding_box(&self) -> Aabb {
///         self.0
///     }
///     fn contains(&self, point: &Point3<f64>) -> bool {
///         self.0.contains(point)
///     }
///     fn centroid(&self) -> Point3<f64> {
///         self.0.center()
///     }
/// }
///
/// let world = Aabb::new(Point3::origin(), Point3::new(10.0, 10.0, 10.0));
/// let mut tree = Octree::new(4, world);
///
/// let half = Vector3::new(0.5, 0.5, 0.5);
/// tree.insert(Cell(Aabb::from_center(Point3::new(2.0, 2.0, 2.0), half)));
/// tree.arrange();
///
/// assert!(tree.search(&Point3::new(2.2, 1.8, 2.0)).is_some());
/// assert!(tree.search(&Point3::new(8.0, 8.0, 8.0)).is_none());
/// ```
pub struct Octree<T> {
    max_elements: usize,
    buckets: Vec<Bucket>,
    elements: Vec<Entry<T>>,
    /// Elements awaiting loose registration by the next `arrange` pass.
    pending: Vec<usize>,
    /// Single-slot result cache: element id plus one, zero when empty.
    /// Races between readers are benign, a stale value only costs a
    /// traversal.
    last_found: AtomicUsize,
    max_depth: u32,
}

impl<T: SpatialElement> Octree<T> {
    /// Creates an empty octree over the given world box.
    ///
    /// The world box is inflated by a 1% margin so elements sitting exactly
    /// on the boundary still locate, and the first level of 8 children is
    /// built immediately. `max_elements` is the per-leaf load that triggers
    /// subdivision.
    #[must_use]
    pub fn new(max_elements: usize, world: Aabb) -> Self {
        let mut tree = Self {
            max_elements,
            buckets: vec![Bucket::leaf(world.with_margin(0.01), 0)],
            elements: Vec::new(),
            pending: Vec::new(),
            last_found: AtomicUsize::new(0),
            max_depth: 0,
        };
        tree.subdivide(0);
        tree
    }

    /// Inserts an element, placing it in the leaf containing its centroid.
    ///
    /// Returns `false` and drops the element if its centroid lies outside
    /// the world box; the failure is logged and the index stays usable.
    /// Overfull leaves subdivide until the load drops to `max_elements` or
    /// the depth cap engages.
    pub fn insert(&mut self, element: T) -> bool {
        let bbox = element.bounding_box();
        let centroid = element.centroid();

        let Some(leaf) = self.find_leaf(0, &centroid) else {
            error!(?centroid, "element centroid outside octree world, dropped");
            return false;
        };

        let id = self.elements.len();
        self.elements.push(Entry {
            element,
            bbox,
            centroid,
        });
        self.pending.push(id);
        self.buckets[leaf].exact.push(id);
        self.cascade(leaf);
        true
    }

    /// Resolves leaf overflow starting at `bucket`. Redistribution moves
    /// each element to the child holding its centroid, so at most one child
    /// can overflow per pass and the cascade follows it down.
    fn cascade(&mut self, mut bucket: usize) {
        loop {
            if self.buckets[bucket].exact.len() <= self.max_elements
                || self.buckets[bucket].depth >= MAX_SUBDIVISION_DEPTH
            {
                return;
            }
            self.subdivide(bucket);

            let ids = std::mem::take(&mut self.buckets[bucket].exact);
            let mut overflowed = None;
            for id in ids {
                let centroid = self.elements[id].centroid;
                match self.find_leaf(bucket, &centroid) {
                    Some(child) => {
                        self.buckets[child].exact.push(id);
                        if self.buckets[child].exact.len() > self.max_elements {
                            overflowed = Some(child);
                        }
                    }
                    None => {
                        // Unreachable from here on, but the run continues.
                        error!(?centroid, "lost element during octant redistribution");
                    }
                }
            }
            match overflowed {
                Some(next) => bucket = next,
                None => return,
            }
        }
    }

    /// Registers every element inserted since the last call in each leaf its
    /// bounding box overlaps.
    ///
    /// Call once after a batch of insertions; [`Self::search`] needs it only
    /// for points covered by an element whose centroid landed elsewhere.
    pub fn arrange(&mut self) {
        for id in std::mem::take(&mut self.pending) {
            self.register_loose(0, id);
        }
    }

    fn register_loose(&mut self, bucket: usize, id: usize) {
        let bbox = self.elements[id].bbox;
        if !self.buckets[bucket].bounds.overlaps(&bbox) {
            return;
        }
        if let Some(first) = self.buckets[bucket].first_child {
            for child in first..first + 8 {
                self.register_loose(child, id);
            }
        } else {
            let leaf = &mut self.buckets[bucket];
            if !leaf.exact.contains(&id) && !leaf.loose.contains(&id) {
                leaf.loose.push(id);
            }
        }
    }

    /// Returns an element containing the point, or `None` if the point sits
    /// in empty space.
    ///
    /// The previous hit is tried first through a lock-free one-slot cache,
    /// which makes runs of queries against the same element O(1).
    #[must_use]
    pub fn search(&self, point: &Point3<f64>) -> Option<&T> {
        let cached = self.last_found.load(Ordering::Relaxed);
        if cached != 0 {
            if let Some(entry) = self.elements.get(cached - 1) {
                if entry.bbox.contains(point) && entry.element.contains(point) {
                    return Some(&entry.element);
                }
            }
        }

        let Some(leaf) = self.find_leaf(0, point) else {
            debug!(?point, "point outside octree world");
            return None;
        };

        let bucket = &self.buckets[leaf];
        for &id in bucket.exact.iter().chain(bucket.loose.iter()) {
            let entry = &self.elements[id];
            if entry.bbox.contains(point) && entry.element.contains(point) {
                self.last_found.store(id + 1, Ordering::Relaxed);
                return Some(&entry.element);
            }
        }
        None
    }

    /// Returns every element containing the point.
    ///
    /// Complete for overlapping elements only after [`Self::arrange`] has
    /// run. Bypasses the result cache.
    #[must_use]
    pub fn search_all(&self, point: &Point3<f64>) -> Vec<&T> {
        let Some(leaf) = self.find_leaf(0, point) else {
            debug!(?point, "point outside octree world");
            return Vec::new();
        };

        let bucket = &self.buckets[leaf];
        bucket
            .exact
            .iter()
            .chain(bucket.loose.iter())
            .filter_map(|&id| {
                let entry = &self.elements[id];
                (entry.bbox.contains(point) && entry.element.contains(point))
                    .then_some(&entry.element)
            })
            .collect()
    }

    /// Number of elements held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the tree holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of octant buckets, the root included.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Deepest subdivision level reached. The initial grid is level 1.
    #[must_use]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Largest number of centroid-placed elements in any leaf.
    ///
    /// Stays at or below `max_elements` unless the depth cap engaged.
    #[must_use]
    pub fn max_leaf_load(&self) -> usize {
        self.buckets
            .iter()
            .filter(|b| b.first_child.is_none())
            .map(|b| b.exact.len())
            .max()
            .unwrap_or(0)
    }

    /// Descends from `start` to the unique leaf containing the point.
    fn find_leaf(&self, start: usize, point: &Point3<f64>) -> Option<usize> {
        if !self.buckets[start].bounds.contains(point) {
            return None;
        }
        let mut current = start;
        while let Some(first) = self.buckets[current].first_child {
            current = (first..first + 8)
                .find(|&child| self.buckets[child].bounds.contains(point))?;
        }
        Some(current)
    }

    /// Splits a leaf into 8 children tiling its box.
    fn subdivide(&mut self, bucket: usize) {
        let bounds = self.buckets[bucket].bounds;
        let depth = self.buckets[bucket].depth + 1;
        let step = bounds.size() / 2.0;
        let first = self.buckets.len();

        for k in 0..2 {
            for j in 0..2 {
                for i in 0..2 {
                    let min = Point3::new(
                        step.x.mul_add(f64::from(i), bounds.min.x),
                        step.y.mul_add(f64::from(j), bounds.min.y),
                        step.z.mul_add(f64::from(k), bounds.min.z),
                    );
                    let max = Point3::new(min.x + step.x, min.y + step.y, min.z + step.z);
                    self.buckets.push(Bucket::leaf(Aabb { min, max }, depth));
                }
            }
        }

        self.buckets[bucket].first_child = Some(first);
        self.max_depth = self.max_depth.max(depth);

        // Loose registrations belong on leaves; hand them down to every
        // overlapping child so earlier `arrange` passes stay visible.
        let loose = std::mem::take(&mut self.buckets[bucket].loose);
        for id in loose {
            let bbox = self.elements[id].bbox;
            for child in first..first + 8 {
                if self.buckets[child].bounds.overlaps(&bbox) {
                    self.buckets[child].loose.push(id);
                }
            }
        }
    }
}

impl<T> fmt::Debug for Octree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Octree")
            .field("max_elements", &self.max_elements)
            .field("elements", &self.elements.len())
            .field("buckets", &self.buckets.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    struct BoxElem {
        bounds: Aabb,
    }

    impl BoxElem {
        fn at(x: f64, y: f64, z: f64) -> Self {
            Self {
                bounds: Aabb::from_center(Point3::new(x, y, z), Vector3::new(0.5, 0.5, 0.5)),
            }
        }
    }

    impl SpatialElement for BoxElem {
        fn bounding_box(&self) -> Aabb {
            self.bounds
        }

        fn contains(&self, point: &Point3<f64>) -> bool {
            self.bounds.contains(point)
        }

        fn centroid(&self) -> Point3<f64> {
            self.bounds.center()
        }
    }

    fn ten_cube() -> Aabb {
        Aabb::new(Point3::origin(), Point3::new(10.0, 10.0, 10.0))
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_builds_initial_grid() {
        let tree: Octree<BoxElem> = Octree::new(4, ten_cube());
        assert!(tree.is_empty());
        assert_eq!(tree.bucket_count(), 9);
        assert_eq!(tree.max_depth(), 1);
    }

    // ==================== Insert Tests ====================

    #[test]
    fn test_insert_well_separated_respects_load() {
        let mut tree = Octree::new(2, ten_cube());
        for (x, y, z) in [
            (1.0, 1.0, 1.0),
            (9.0, 1.0, 1.0),
            (1.0, 9.0, 1.0),
            (1.0, 1.0, 9.0),
            (9.0, 9.0, 9.0),
        ] {
            assert!(tree.insert(BoxElem::at(x, y, z)));
        }
        assert_eq!(tree.len(), 5);
        assert!(tree.max_leaf_load() <= 2);
    }

    #[test]
    fn test_insert_outside_world_rejected() {
        let mut tree = Octree::new(2, ten_cube());
        assert!(!tree.insert(BoxElem::at(50.0, 50.0, 50.0)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert_on_world_boundary_accepted() {
        // The 1% margin keeps boundary centroids inside the root box
        let mut tree = Octree::new(2, ten_cube());
        assert!(tree.insert(BoxElem::at(0.0, 0.0, 0.0)));
        assert!(tree.insert(BoxElem::at(10.0, 10.0, 10.0)));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_coincident_centroids_hit_depth_cap() {
        let mut tree = Octree::new(2, ten_cube());
        for _ in 0..5 {
            assert!(tree.insert(BoxElem::at(3.0, 3.0, 3.0)));
        }
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.max_depth(), MAX_SUBDIVISION_DEPTH);
        // The cap leaves one leaf over-full
        assert_eq!(tree.max_leaf_load(), 5);
        assert!(tree.search(&Point3::new(3.0, 3.0, 3.0)).is_some());
    }

    #[test]
    fn test_subdivision_grows_bucket_count() {
        let mut tree = Octree::new(1, ten_cube());
        let before = tree.bucket_count();
        tree.insert(BoxElem::at(1.0, 1.0, 1.0));
        tree.insert(BoxElem::at(2.0, 2.0, 2.0));
        assert!(tree.bucket_count() > before);
        assert!(tree.max_depth() >= 2);
    }

    // ==================== Search Tests ====================

    #[test]
    fn test_search_finds_containing_element() {
        let mut tree = Octree::new(2, ten_cube());
        tree.insert(BoxElem::at(2.0, 2.0, 2.0));
        tree.insert(BoxElem::at(7.0, 7.0, 7.0));

        let hit = tree.search(&Point3::new(2.3, 1.8, 2.1)).unwrap();
        assert!((hit.centroid() - Point3::new(2.0, 2.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn test_search_empty_space_is_none() {
        let mut tree = Octree::new(2, ten_cube());
        tree.insert(BoxElem::at(2.0, 2.0, 2.0));
        assert!(tree.search(&Point3::new(5.0, 5.0, 5.0)).is_none());
        assert!(tree.search(&Point3::new(-100.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_search_empty_tree() {
        let tree: Octree<BoxElem> = Octree::new(2, ten_cube());
        assert!(tree.search(&Point3::new(5.0, 5.0, 5.0)).is_none());
    }

    #[test]
    fn test_search_cache_does_not_leak_across_elements() {
        let mut tree = Octree::new(2, ten_cube());
        tree.insert(BoxElem::at(2.0, 2.0, 2.0));
        tree.insert(BoxElem::at(7.0, 7.0, 7.0));

        // Prime the cache on the first element, then query the second
        let p1 = Point3::new(2.0, 2.0, 2.0);
        let p2 = Point3::new(7.0, 7.0, 7.0);
        assert!(tree.search(&p1).unwrap().contains(&p1));
        let hit = tree.search(&p2).unwrap();
        assert!(hit.contains(&p2));
        assert!((hit.centroid() - p2).norm() < 1e-12);
    }

    // ==================== Arrange / SearchAll Tests ====================

    #[test]
    fn test_search_all_overlapping_after_arrange() {
        let mut tree = Octree::new(2, ten_cube());
        // Two unit boxes sharing the region around (3.5, 3.0, 3.0)
        tree.insert(BoxElem::at(3.2, 3.0, 3.0));
        tree.insert(BoxElem::at(3.8, 3.0, 3.0));
        tree.insert(BoxElem::at(8.0, 8.0, 8.0));
        tree.arrange();

        let hits = tree.search_all(&Point3::new(3.5, 3.0, 3.0));
        assert_eq!(hits.len(), 2);
        for hit in hits {
            assert!(hit.contains(&Point3::new(3.5, 3.0, 3.0)));
        }
    }

    #[test]
    fn test_arrange_makes_straddling_element_findable() {
        // Element centroid lands in one octant while its box pokes into a
        // neighboring one
        let mut tree = Octree::new(1, ten_cube());
        tree.insert(BoxElem::at(4.9, 4.9, 4.9));
        tree.insert(BoxElem::at(9.0, 1.0, 1.0));
        tree.arrange();

        // Just across the first-level octant boundary from the centroid
        let probe = Point3::new(5.3, 5.3, 5.3);
        assert!(tree.search(&probe).is_some());
        assert_eq!(tree.search_all(&probe).len(), 1);
    }

    #[test]
    fn test_search_all_empty_space() {
        let mut tree = Octree::new(2, ten_cube());
        tree.insert(BoxElem::at(2.0, 2.0, 2.0));
        tree.arrange();
        assert!(tree.search_all(&Point3::new(8.0, 8.0, 8.0)).is_empty());
    }

    #[test]
    fn test_loose_entries_survive_subdivision() {
        let mut tree = Octree::new(1, ten_cube());
        // Box straddling the first-level octant boundary, registered
        // loosely in the high octant by arrange
        tree.insert(BoxElem::at(4.9, 4.9, 4.9));
        tree.arrange();
        let probe = Point3::new(5.3, 5.3, 5.3);
        assert!(tree.search(&probe).is_some());

        // Overfill the octant holding that loose registration so it
        // subdivides after the fact
        tree.insert(BoxElem::at(6.0, 6.0, 6.0));
        tree.insert(BoxElem::at(9.0, 9.0, 9.0));
        tree.arrange();

        assert!(tree.search(&probe).is_some());
        assert_eq!(tree.search_all(&probe).len(), 1);
    }

    #[test]
    fn test_arrange_is_incremental() {
        let mut tree = Octree::new(2, ten_cube());
        tree.insert(BoxElem::at(3.2, 3.0, 3.0));
        tree.arrange();
        tree.insert(BoxElem::at(3.8, 3.0, 3.0));
        tree.arrange();

        let hits = tree.search_all(&Point3::new(3.5, 3.0, 3.0));
        assert_eq!(hits.len(), 2);
    }
}
