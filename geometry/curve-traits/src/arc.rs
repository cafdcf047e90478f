//! Circular arc curve.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A circular arc in the XY plane, parameterized by angle.
///
/// The parameter *is* the angle in radians, so the parameter range is
/// `(start_angle, end_angle)` rather than `[0, 1]`. This exercises the
/// non-trivial parameter ranges that geometry kernels hand to the schemes.
///
/// # Example
///
/// ```
/// use curve_traits::{CircularArc, Curve};
/// use nalgebra::Point3;
/// use std::f64::consts::PI;
///
/// // Quarter circle of radius 2
/// let arc = CircularArc::new(Point3::origin(), 2.0, 0.0, PI / 2.0).unwrap();
///
/// assert!((arc.length() - PI).abs() < 1e-12);
/// assert_eq!(arc.param_range(), (0.0, PI / 2.0));
///
/// let start = arc.point(0.0);
/// assert!((start.x - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CircularArc {
    center: Point3<f64>,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl CircularArc {
    /// Create an arc from center, radius, and a start/end angle pair.
    ///
    /// Angles are in radians; the arc is traced counter-clockwise from
    /// `start_angle` to `end_angle`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidRadius`] for a non-positive radius and
    /// [`CurveError::ZeroSweep`] when the angles coincide.
    pub fn new(
        center: Point3<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> CurveResult<Self> {
        if radius <= 0.0 {
            return Err(CurveError::InvalidRadius(radius));
        }
        if start_angle == end_angle {
            return Err(CurveError::ZeroSweep);
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Full circle of the given radius, parameterized over `0..2π`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidRadius`] for a non-positive radius.
    pub fn full_circle(center: Point3<f64>, radius: f64) -> CurveResult<Self> {
        Self::new(center, radius, 0.0, std::f64::consts::TAU)
    }

    /// The arc's radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// The swept angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

impl Curve for CircularArc {
    fn point(&self, u: f64) -> Point3<f64> {
        self.center + Vector3::new(self.radius * u.cos(), self.radius * u.sin(), 0.0)
    }

    fn d1(&self, u: f64) -> Vector3<f64> {
        Vector3::new(-self.radius * u.sin(), self.radius * u.cos(), 0.0)
    }

    fn curvature(&self, _u: f64) -> f64 {
        1.0 / self.radius
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep().abs()
    }

    fn param_range(&self) -> (f64, f64) {
        (self.start_angle, self.end_angle)
    }
}
