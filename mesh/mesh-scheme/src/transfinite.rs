//! Integral-based node placement with a family of density laws.
//!
//! All schemes in this family share one procedure: integrate a density
//! function over the curve's parameter range, then place interior nodes at
//! the parameters where the cumulative primitive reaches equal fractions of
//! the total. The density law is the only thing that varies.

use std::sync::Arc;

use curve_traits::Curve;
use mesh_integral::Integral1d;
use mesh_params::ParamStore;
use nalgebra::Point3;
use tracing::debug;

use crate::discretization::CurveDiscretization;
use crate::error::{SchemeError, SchemeResult};
use crate::scheme::Scheme;

/// A background size field: desired element size as a function of position.
pub type SizeField = Arc<dyn Fn(&Point3<f64>) -> f64 + Send + Sync>;

/// The density law driving node placement.
#[derive(Clone)]
pub enum DensityLaw {
    /// Uniform in arclength: `|curve'(u)| * coef / length`.
    ArcLength {
        /// Sizing coefficient.
        coef: f64,
    },
    /// Geometric progression `a·r^i` along the curve.
    Progression {
        /// Common ratio of the progression.
        coef: f64,
        /// Orientation: a negative value inverts the ratio.
        orientation: i64,
    },
    /// Symmetric clustering toward the ends (`coef < 1`) or the middle
    /// (`coef > 1`).
    Bump {
        /// Clustering coefficient.
        coef: f64,
    },
    /// Boundary-layer grading: hyperbolic clustering toward one end for
    /// `coef >= 1`, arclength-uniform sizing below that.
    BetaLaw {
        /// Stretching coefficient ("beta").
        coef: f64,
        /// Orientation: a negative value clusters toward the other end.
        orientation: i64,
    },
    /// Caller-supplied background size field: `|curve'(u)| / h(point(u))`.
    SizeMap {
        /// The size field.
        field: SizeField,
    },
}

impl std::fmt::Debug for DensityLaw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArcLength { coef } => f.debug_struct("ArcLength").field("coef", coef).finish(),
            Self::Progression { coef, orientation } => f
                .debug_struct("Progression")
                .field("coef", coef)
                .field("orientation", orientation)
                .finish(),
            Self::Bump { coef } => f.debug_struct("Bump").field("coef", coef).finish(),
            Self::BetaLaw { coef, orientation } => f
                .debug_struct("BetaLaw")
                .field("coef", coef)
                .field("orientation", orientation)
                .finish(),
            Self::SizeMap { .. } => f.debug_struct("SizeMap").finish_non_exhaustive(),
        }
    }
}

/// Hyperbolic boundary-layer grading function.
///
/// `dfbeta(t, beta) = 2β / ((1 + β − t)(β − 1 + t) · ln((1 + β)/(β − 1)))`
/// for normalized `t ∈ [0, 1]` and `beta > 1`.
pub(crate) fn dfbeta(t: f64, beta: f64) -> f64 {
    let ratio = (1.0 + beta) / (beta - 1.0);
    let zlog = ratio.ln();
    2.0 * beta / ((1.0 + beta - t) * (beta - 1.0 + t) * zlog)
}

impl DensityLaw {
    /// Evaluate the density at curve parameter `u`.
    ///
    /// `n_pts` is the prospective node count, consumed by the progression
    /// and bump laws.
    pub fn eval(&self, curve: &dyn Curve, u: f64, n_pts: usize) -> f64 {
        let (lo, hi) = curve.param_range();
        let t = (u - lo) / (hi - lo);
        let d = curve.d1(u).norm();
        let length = curve.length();

        match self {
            Self::ArcLength { coef } => d * coef / length,
            Self::Progression { coef, orientation } => {
                if (coef - 1.0).abs() < 1e-12 {
                    d / length
                } else {
                    let r = if *orientation >= 0 { *coef } else { 1.0 / coef };
                    #[allow(clippy::cast_precision_loss)]
                    let a = length * (r - 1.0) / (r.powf(n_pts as f64 - 1.0) - 1.0);
                    let i = ((t * length / a * (r - 1.0) + 1.0).ln() / r.ln()).floor();
                    d / (a * r.powf(i))
                }
            }
            Self::Bump { coef } => {
                if (coef - 1.0).abs() < 1e-12 {
                    return d / length;
                }
                #[allow(clippy::cast_precision_loss)]
                let n = n_pts as f64;
                let a = if *coef > 1.0 {
                    -4.0 * (coef - 1.0).sqrt() * 1.0_f64.atan2((coef - 1.0).sqrt()) / (n * length)
                } else {
                    2.0 * (1.0 - coef).sqrt()
                        * ((1.0 + 1.0 / (1.0 - coef).sqrt()) / (1.0 - 1.0 / (1.0 - coef).sqrt()))
                            .abs()
                            .ln()
                        / (n * length)
                };
                let b = -a * length * length / (4.0 * (coef - 1.0));
                d / (-a * (t * length - length * 0.5).powi(2) + b)
            }
            Self::BetaLaw { coef, orientation } => {
                if *coef < 1.0 {
                    d * coef / length
                } else if *orientation < 0 {
                    dfbeta(1.0 - t, *coef)
                } else {
                    dfbeta(t, *coef)
                }
            }
            Self::SizeMap { field } => d / field(&curve.point(u)),
        }
    }

    /// The registered scheme name this law corresponds to.
    #[must_use]
    pub const fn scheme_name(&self) -> &'static str {
        match self {
            Self::ArcLength { .. } => "equal",
            Self::Progression { .. } => "bias",
            Self::Bump { .. } => "bump",
            Self::BetaLaw { .. } => "beta-law",
            Self::SizeMap { .. } => "sizemap",
        }
    }
}

/// Place `n_interior` nodes at equal primitive fractions of `integral`.
///
/// Returns the full ordered parameter list, boundaries included. Fractions
/// that cannot be bracketed (an empty or degenerate table) are skipped with
/// a diagnostic, never an error.
pub(crate) fn place_params(integral: &Integral1d, n_interior: usize, lo: f64, hi: f64) -> Vec<f64> {
    let total = integral.value();
    let mut params = Vec::with_capacity(n_interior + 2);
    params.push(lo);
    #[allow(clippy::cast_precision_loss)]
    for i in 1..=n_interior {
        let target = total * i as f64 / (n_interior + 1) as f64;
        match integral.param_at(target) {
            Some(t) => params.push(t),
            None => debug!(target, "primitive fraction not bracketed, node skipped"),
        }
    }
    params.push(hi);
    params
}

/// The transfinite scheme: a prescribed interior node count positioned by a
/// [`DensityLaw`].
///
/// # Example
///
/// ```
/// use curve_traits::Line;
/// use mesh_params::ParamStore;
/// use mesh_scheme::{Scheme, SchemeTransfinite, DensityLaw};
/// use nalgebra::Point3;
///
/// let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
///
/// let mut params = ParamStore::new();
/// params.set("points", 3i64);
/// let scheme = SchemeTransfinite::from_params(
///     &params,
///     DensityLaw::ArcLength { coef: 1.0 },
/// ).unwrap();
///
/// let result = scheme.mesh_curve(&line).unwrap();
/// assert_eq!(result.node_count(), 5);
/// assert_eq!(result.segment_count(), 4);
/// ```
#[derive(Debug)]
pub struct SchemeTransfinite {
    n_interior: usize,
    law: DensityLaw,
}

impl SchemeTransfinite {
    /// Default parameters declared by this scheme family.
    #[must_use]
    pub fn default_params() -> ParamStore {
        let mut params = ParamStore::new();
        params.declare("points", 1i64);
        params.declare("coef", 1.0f64);
        params.declare("orientation", 1i64);
        params.declare("type", String::from("progression"));
        params
    }

    /// Build the scheme from a parameter store and an explicit density law.
    ///
    /// # Errors
    ///
    /// Propagates missing/mistyped parameters; rejects a negative `points`.
    pub fn from_params(params: &ParamStore, law: DensityLaw) -> SchemeResult<Self> {
        let mut merged = Self::default_params();
        merged.merge(params);
        let points = merged.get::<i64>("points")?;
        let n_interior =
            usize::try_from(points).map_err(|_| SchemeError::InvalidParameter {
                name: "points".to_string(),
                reason: format!("must be non-negative, got {points}"),
            })?;
        Ok(Self { n_interior, law })
    }

    /// Build the scheme selecting the density law from the `type` parameter
    /// (`progression`, `bump`, `beta-law`, or `size-map`).
    ///
    /// # Errors
    ///
    /// [`SchemeError::InvalidParameter`] for an unrecognized `type`.
    pub fn from_typed_params(params: &ParamStore) -> SchemeResult<Self> {
        let mut merged = Self::default_params();
        merged.merge(params);
        let coef = merged.get::<f64>("coef")?;
        let orientation = merged.get::<i64>("orientation")?;
        let law = match merged.get::<String>("type")?.as_str() {
            "progression" => DensityLaw::Progression { coef, orientation },
            "bump" => DensityLaw::Bump { coef },
            "beta-law" => DensityLaw::BetaLaw { coef, orientation },
            "size-map" => DensityLaw::SizeMap {
                field: Arc::new(|_| 1.0),
            },
            other => {
                return Err(SchemeError::InvalidParameter {
                    name: "type".to_string(),
                    reason: format!("unknown transfinite type '{other}'"),
                })
            }
        };
        Self::from_params(params, law)
    }

    /// Build a size-map scheme with an injected background size field.
    ///
    /// # Errors
    ///
    /// Propagates missing/mistyped parameters.
    pub fn with_size_field(params: &ParamStore, field: SizeField) -> SchemeResult<Self> {
        Self::from_params(params, DensityLaw::SizeMap { field })
    }

    /// The density law in use.
    #[must_use]
    pub const fn law(&self) -> &DensityLaw {
        &self.law
    }
}

impl Scheme for SchemeTransfinite {
    fn name(&self) -> &str {
        self.law.scheme_name()
    }

    fn mesh_curve(&self, curve: &dyn Curve) -> SchemeResult<CurveDiscretization> {
        let (lo, hi) = curve.param_range();
        let n_pts = self.n_interior + 1;
        let law = &self.law;
        let integral = Integral1d::integrate(curve, lo, hi, |c, u| law.eval(c, u, n_pts));
        let params = place_params(&integral, self.n_interior, lo, hi);
        Ok(CurveDiscretization::from_params(curve, params))
    }
}
