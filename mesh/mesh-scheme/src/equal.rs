//! Uniform parameter spacing via a linear solve.

use curve_traits::Curve;
use mesh_integral::Integral1d;
use mesh_params::ParamStore;
use nalgebra::{DMatrix, DVector};

use crate::discretization::CurveDiscretization;
use crate::error::{SchemeError, SchemeResult};
use crate::scheme::Scheme;
use crate::transfinite::{place_params, DensityLaw};

/// How the uniform spacing is computed.
///
/// Two historically independent implementations produce the same spacing;
/// both are kept as selectable variants so either can be validated against
/// the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualMethod {
    /// Tridiagonal linear system solved by LU factorization.
    Solve,
    /// Arclength-density integration with equal-fraction placement.
    Integral,
}

/// The uniform-spacing scheme: `n` interior nodes, equally spaced in the
/// curve parameter.
///
/// The solve path builds a tridiagonal system over the `n + 2` node
/// parameters: the two boundary rows pin the first and last unknowns to the
/// parameter range, and each interior row demands that the difference to the
/// next node equals the difference from the previous one. The formulation is
/// deliberately solve-based so non-uniform spacing laws can reuse the same
/// path by perturbing the coefficients.
///
/// # Example
///
/// ```
/// use curve_traits::Line;
/// use mesh_params::ParamStore;
/// use mesh_scheme::{Scheme, SchemeEqual};
/// use nalgebra::Point3;
///
/// let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
///
/// let mut params = ParamStore::new();
/// params.set("points", 4i64);
/// let scheme = SchemeEqual::from_params(&params).unwrap();
///
/// let result = scheme.mesh_curve(&line).unwrap();
/// assert_eq!(result.node_count(), 6);
/// assert!((result.params[1] - 0.2).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct SchemeEqual {
    n_interior: usize,
    method: EqualMethod,
}

impl SchemeEqual {
    /// Default parameters declared by this scheme.
    #[must_use]
    pub fn default_params() -> ParamStore {
        let mut params = ParamStore::new();
        params.declare("points", 1i64);
        params.declare("method", String::from("solve"));
        params
    }

    /// Build the scheme from a parameter store.
    ///
    /// Reads `points` (interior node count) and `method`
    /// (`"solve"` or `"integral"`).
    ///
    /// # Errors
    ///
    /// Propagates missing/mistyped parameters; rejects a negative `points`
    /// and an unrecognized `method`.
    pub fn from_params(params: &ParamStore) -> SchemeResult<Self> {
        let mut merged = Self::default_params();
        merged.merge(params);
        let points = merged.get::<i64>("points")?;
        let n_interior = usize::try_from(points).map_err(|_| SchemeError::InvalidParameter {
            name: "points".to_string(),
            reason: format!("must be non-negative, got {points}"),
        })?;
        let method = match merged.get::<String>("method")?.as_str() {
            "solve" => EqualMethod::Solve,
            "integral" => EqualMethod::Integral,
            other => {
                return Err(SchemeError::InvalidParameter {
                    name: "method".to_string(),
                    reason: format!("expected 'solve' or 'integral', got '{other}'"),
                })
            }
        };
        Ok(Self { n_interior, method })
    }

    /// The active spacing method.
    #[must_use]
    pub const fn method(&self) -> EqualMethod {
        self.method
    }

    fn solve_params(&self, lo: f64, hi: f64) -> SchemeResult<Vec<f64>> {
        let size = self.n_interior + 2;
        let mut a = DMatrix::<f64>::zeros(size, size);
        let mut b = DVector::<f64>::zeros(size);

        // Boundary rows pin the endpoints
        a[(0, 0)] = 1.0;
        b[0] = lo;
        a[(size - 1, size - 1)] = 1.0;
        b[size - 1] = hi;

        // Interior rows: each difference equals the previous difference
        for i in 1..=self.n_interior {
            a[(i, i - 1)] = 1.0;
            a[(i, i)] = -2.0;
            a[(i, i + 1)] = 1.0;
        }

        let lu = a.lu();
        if !lu.is_invertible() {
            return Err(SchemeError::FactorizationFailed);
        }
        let x = lu.solve(&b).ok_or(SchemeError::SolveFailed)?;
        Ok(x.iter().copied().collect())
    }
}

impl Scheme for SchemeEqual {
    fn name(&self) -> &str {
        "equal"
    }

    fn mesh_curve(&self, curve: &dyn Curve) -> SchemeResult<CurveDiscretization> {
        let (lo, hi) = curve.param_range();
        let params = match self.method {
            EqualMethod::Solve => self.solve_params(lo, hi)?,
            EqualMethod::Integral => {
                let law = DensityLaw::ArcLength { coef: 1.0 };
                let n_pts = self.n_interior + 1;
                let integral =
                    Integral1d::integrate(curve, lo, hi, |c, u| law.eval(c, u, n_pts));
                place_params(&integral, self.n_interior, lo, hi)
            }
        };
        Ok(CurveDiscretization::from_params(curve, params))
    }
}
