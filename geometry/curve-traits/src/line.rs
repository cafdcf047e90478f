//! Straight line segment.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A straight segment between two points, parameterized over `[0, 1]`.
///
/// # Example
///
/// ```
/// use curve_traits::{Curve, Line};
/// use nalgebra::Point3;
///
/// let line = Line::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 4.0, 0.0),
/// ).unwrap();
///
/// assert_eq!(line.length(), 5.0);
/// assert_eq!(line.point(0.5), Point3::new(1.5, 2.0, 0.0));
/// assert_eq!(line.curvature(0.5), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line {
    start: Point3<f64>,
    end: Point3<f64>,
}

impl Line {
    /// Create a line segment from two distinct points.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateEndpoints`] if the points coincide.
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> CurveResult<Self> {
        if (end - start).norm_squared() == 0.0 {
            return Err(CurveError::DegenerateEndpoints);
        }
        Ok(Self { start, end })
    }

    /// The segment's start point.
    #[must_use]
    pub const fn start(&self) -> Point3<f64> {
        self.start
    }

    /// The segment's end point.
    #[must_use]
    pub const fn end(&self) -> Point3<f64> {
        self.end
    }
}

impl Curve for Line {
    fn point(&self, u: f64) -> Point3<f64> {
        self.start + (self.end - self.start) * u
    }

    fn d1(&self, _u: f64) -> Vector3<f64> {
        self.end - self.start
    }

    fn curvature(&self, _u: f64) -> f64 {
        0.0
    }

    fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    fn param_range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}
