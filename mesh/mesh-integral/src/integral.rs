//! Recursive adaptive quadrature with a monotone sample table.

use curve_traits::Curve;

/// Integration tolerance: a subdivision is accepted once the trapezoid
/// mismatch falls below this.
const PRECISION: f64 = 1e-8;

/// Minimum recursion depth before the tolerance may accept a subdivision.
const MIN_DEPTH: u32 = 6;

/// Hard recursion cap. Beyond this the subdivision is accepted regardless of
/// the error estimate, trading accuracy for guaranteed termination.
const MAX_DEPTH: u32 = 25;

/// One recorded integration sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntPoint {
    /// The curve parameter of the sample.
    pub t: f64,
    /// The local density value at `t`.
    pub lc: f64,
    /// The cumulative primitive of the density from the start parameter.
    pub p: f64,
    /// The norm of the curve tangent at `t`.
    pub xp: f64,
}

/// The result of one adaptive integration pass: an ordered table of samples
/// plus the total integral value.
///
/// The table is strictly increasing in `t` and, for a non-negative density,
/// non-decreasing in the cumulative primitive `p`. It supports inverse
/// lookup via [`Integral1d::param_at`].
///
/// # Example
///
/// ```
/// use curve_traits::Line;
/// use mesh_integral::Integral1d;
/// use nalgebra::Point3;
///
/// let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
///
/// // Constant density 2 over [0, 1] integrates to 2
/// let integral = Integral1d::integrate(&line, 0.0, 1.0, |_, _| 2.0);
/// assert!((integral.value() - 2.0).abs() < 1e-8);
///
/// // Inverse lookup: half the primitive lands at the midpoint
/// let t = integral.param_at(1.0).unwrap();
/// assert!((t - 0.5).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct Integral1d {
    pts: Vec<IntPoint>,
    val: f64,
}

impl Integral1d {
    /// Integrate `density` over `[t1, t2]` of `curve`.
    ///
    /// The density is evaluated on bisected intervals until the trapezoid
    /// estimate over an interval agrees with the sum over its halves to
    /// within tolerance (after a minimum refinement depth), or until the
    /// hard depth cap. Every accepted sample is recorded in parameter order.
    pub fn integrate<C, F>(curve: &C, t1: f64, t2: f64, density: F) -> Self
    where
        C: Curve + ?Sized,
        F: Fn(&C, f64) -> f64,
    {
        let from = IntPoint {
            t: t1,
            lc: density(curve, t1),
            p: 0.0,
            xp: curve.d1(t1).norm(),
        };
        let to = IntPoint {
            t: t2,
            lc: density(curve, t2),
            p: 0.0,
            xp: curve.d1(t2).norm(),
        };

        let mut pts = vec![from];
        recurse(curve, &mut pts, from, to, &density, 1);

        let val = pts.last().map_or(0.0, |p| p.p);
        Self { pts, val }
    }

    /// The total value of the integral.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.val
    }

    /// The recorded samples, ordered by `t`.
    #[must_use]
    pub fn points(&self) -> &[IntPoint] {
        &self.pts
    }

    /// A single sample by index.
    #[must_use]
    pub fn point(&self, idx: usize) -> &IntPoint {
        &self.pts[idx]
    }

    /// Number of recorded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// Inverse lookup: the parameter at which the cumulative primitive
    /// reaches `target`.
    ///
    /// Locates the bracketing samples and interpolates `t` linearly between
    /// them. Returns `None` when `target` lies outside `[0, value()]` or the
    /// table has fewer than two samples.
    #[must_use]
    pub fn param_at(&self, target: f64) -> Option<f64> {
        if self.pts.len() < 2 || target < 0.0 || target > self.val {
            return None;
        }
        for pair in self.pts.windows(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            if target >= p1.p && target <= p2.p {
                let dp = p2.p - p1.p;
                if dp == 0.0 {
                    return Some(p1.t);
                }
                return Some(p1.t + (p2.t - p1.t) / dp * (target - p1.p));
            }
        }
        None
    }
}

fn trapezoid(p1: &IntPoint, p2: &IntPoint) -> f64 {
    0.5 * (p1.lc + p2.lc) * (p2.t - p1.t)
}

fn recurse<C, F>(curve: &C, pts: &mut Vec<IntPoint>, from: IntPoint, mut to: IntPoint, density: &F, depth: u32)
where
    C: Curve + ?Sized,
    F: Fn(&C, f64) -> f64,
{
    let t_mid = 0.5 * (from.t + to.t);
    let mut mid = IntPoint {
        t: t_mid,
        lc: density(curve, t_mid),
        p: 0.0,
        xp: curve.d1(t_mid).norm(),
    };

    let whole = trapezoid(&from, &to);
    let left = trapezoid(&from, &mid);
    let right = trapezoid(&mid, &to);
    let err = (whole - (left + right)).abs();

    if (err < PRECISION && depth > MIN_DEPTH) || depth > MAX_DEPTH {
        // `from` is already the last recorded sample; accumulate through it.
        let base = pts.last().map_or(0.0, |p| p.p);
        mid.p = base + left;
        pts.push(mid);
        to.p = mid.p + right;
        pts.push(to);
    } else {
        recurse(curve, pts, from, mid, density, depth + 1);
        recurse(curve, pts, mid, to, density, depth + 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curve_traits::Line;
    use nalgebra::Point3;

    fn unit_line() -> Line {
        Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_constant_density() {
        let line = unit_line();
        let integral = Integral1d::integrate(&line, 0.0, 4.0, |_, _| 3.0);
        assert_relative_eq!(integral.value(), 12.0, epsilon = 1e-8);
    }

    #[test]
    fn test_cumulative_is_monotone() {
        let line = unit_line();
        let integral = Integral1d::integrate(&line, 0.0, 1.0, |_, t| 1.0 + t * t);
        let pts = integral.points();
        assert!(pts.len() > 2);
        for pair in pts.windows(2) {
            assert!(pair[1].t > pair[0].t);
            assert!(pair[1].p >= pair[0].p);
        }
        assert_relative_eq!(pts.last().unwrap().p, integral.value());
    }

    #[test]
    fn test_quadratic_density_value() {
        // ∫ t² dt over [0, 1] = 1/3; trapezoids converge under refinement
        let line = unit_line();
        let integral = Integral1d::integrate(&line, 0.0, 1.0, |_, t| t * t);
        assert_relative_eq!(integral.value(), 1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_endpoints_are_seeded() {
        let line = unit_line();
        let integral = Integral1d::integrate(&line, 0.25, 0.75, |_, _| 1.0);
        assert_relative_eq!(integral.point(0).t, 0.25);
        assert_relative_eq!(integral.points().last().unwrap().t, 0.75);
        assert_relative_eq!(integral.point(0).p, 0.0);
    }

    #[test]
    fn test_tangent_norm_recorded() {
        let line = Line::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0)).unwrap();
        let integral = Integral1d::integrate(&line, 0.0, 1.0, |_, _| 1.0);
        for pt in integral.points() {
            assert_relative_eq!(pt.xp, 5.0);
        }
    }

    #[test]
    fn test_param_at_round_trip() {
        let line = unit_line();
        let integral = Integral1d::integrate(&line, 0.0, 1.0, |_, t| 1.0 + t);
        for pt in integral.points() {
            let t = integral.param_at(pt.p).unwrap();
            assert_relative_eq!(t, pt.t, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_param_at_out_of_range() {
        let line = unit_line();
        let integral = Integral1d::integrate(&line, 0.0, 1.0, |_, _| 1.0);
        assert_eq!(integral.param_at(-0.1), None);
        assert_eq!(integral.param_at(integral.value() + 0.1), None);
    }

    #[test]
    fn test_discontinuous_density_terminates() {
        // A step the tolerance can never resolve; the depth cap must stop it
        let line = unit_line();
        let integral =
            Integral1d::integrate(&line, 0.0, 1.0, |_, t| if t < 0.5 { 1.0 } else { 2.0 });
        assert!(integral.value() > 1.0 && integral.value() < 2.0);
    }
}
