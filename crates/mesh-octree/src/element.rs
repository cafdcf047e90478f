//! The capability contract indexed elements must satisfy.

use nalgebra::Point3;

use crate::bounds::Aabb;

/// The geometric capabilities an element must expose to be indexed by an
/// [`Octree`](crate::Octree).
///
/// The tree never looks inside the element type. It places elements by
/// centroid, registers them loosely by bounding box, and answers point
/// queries through [`Self::contains`].
///
/// # Example
///
/// ```
/// use mesh_octree::{Aabb, SpatialElement};
/// use nalgebra::Point3;
///
/// struct Cell {
///     bounds: Aabb,
/// }
///
/// impl SpatialElement for Cell {
///     fn bounding_box(&self) -> Aabb {
///         self.bounds
///     }
///
///     fn contains(&self, point: &Point3<f64>) -> bool {
///         self.bounds.contains(point)
///     }
///
///     fn centroid(&self) -> Point3<f64> {
///         self.bounds.center()
///     }
/// }
/// ```
pub trait SpatialElement {
    /// The element's axis-aligned bounding box.
    fn bounding_box(&self) -> Aabb;

    /// Exact membership test, called only after the bounding box accepts
    /// the point.
    fn contains(&self, point: &Point3<f64>) -> bool;

    /// The representative point used to place the element in a single leaf.
    ///
    /// Must lie inside [`Self::bounding_box`].
    fn centroid(&self) -> Point3<f64>;
}
