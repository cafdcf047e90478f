//! The curve interface consumed by discretization schemes.

use nalgebra::{Point3, Vector3};

/// A parametric curve in 3D space, as exposed by a geometry kernel.
///
/// Unlike screen-space curve libraries, the parameter range is *not* fixed to
/// `[0, 1]`: a circle is naturally parameterized over `0..2π`, a trimmed
/// spline over whatever interval the kernel assigned it. Every method takes
/// the curve's own parameter `u`, and callers obtain the valid interval from
/// [`Self::param_range`].
///
/// The trait is object safe; schemes accept `&dyn Curve`.
///
/// # Example
///
/// ```
/// use curve_traits::{Curve, Line};
/// use nalgebra::Point3;
///
/// let line = Line::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0)).unwrap();
/// let (lo, hi) = line.param_range();
/// let mid = line.point(0.5 * (lo + hi));
/// assert_eq!(mid, Point3::new(1.0, 0.0, 0.0));
/// ```
pub trait Curve {
    /// Evaluate the curve position at parameter `u`.
    fn point(&self, u: f64) -> Point3<f64>;

    /// First derivative with respect to `u` (not normalized).
    fn d1(&self, u: f64) -> Vector3<f64>;

    /// Curvature at parameter `u`.
    ///
    /// Returns 0 for straight segments.
    fn curvature(&self, u: f64) -> f64;

    /// Total arc length of the curve.
    fn length(&self) -> f64;

    /// The valid parameter interval `(lo, hi)`.
    fn param_range(&self) -> (f64, f64);

    /// Position of the curve's start vertex.
    fn start_point(&self) -> Point3<f64> {
        let (lo, _) = self.param_range();
        self.point(lo)
    }

    /// Position of the curve's end vertex.
    fn end_point(&self) -> Point3<f64> {
        let (_, hi) = self.param_range();
        self.point(hi)
    }
}
