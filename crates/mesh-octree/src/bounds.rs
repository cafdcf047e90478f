//! Axis-aligned bounding boxes in world coordinates.

use nalgebra::{Point3, Vector3};

/// An axis-aligned bounding box in world coordinates.
///
/// # Example
///
/// ```
/// use mesh_octree::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// assert!(!aabb.contains(&Point3::new(15.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3<f64>,
    /// Maximum corner of the bounding box.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a new AABB from minimum and maximum corners.
    ///
    /// The corners are automatically reordered if necessary.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_octree::Aabb;
    /// use nalgebra::Point3;
    ///
    /// // Corners can be specified in any order
    /// let aabb = Aabb::new(
    ///     Point3::new(10.0, 10.0, 10.0),
    ///     Point3::new(0.0, 0.0, 0.0),
    /// );
    /// assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(10.0, 10.0, 10.0));
    /// ```
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates an AABB centered at a point with the given half-extents.
    #[must_use]
    pub fn from_center(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Returns the center point of the AABB.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the size of the AABB along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Checks if a point is inside the AABB (inclusive of boundaries).
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Checks if this AABB overlaps another (touching counts as overlap).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Returns this AABB inflated by `fraction` of its size on every side.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_octree::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::new(Point3::origin(), Point3::new(10.0, 10.0, 10.0));
    /// let inflated = aabb.with_margin(0.01);
    /// assert_eq!(inflated.min, Point3::new(-0.1, -0.1, -0.1));
    /// assert_eq!(inflated.max, Point3::new(10.1, 10.1, 10.1));
    /// ```
    #[must_use]
    pub fn with_margin(&self, fraction: f64) -> Self {
        let margin = self.size() * fraction;
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Grows the AABB to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = Point3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }
}
