//! The scheme dispatch contract.

use curve_traits::Curve;

use crate::discretization::{CurveDiscretization, SurfaceDiscretization, SurfaceDomain};
use crate::error::{SchemeError, SchemeResult};

/// A named, parameterized discretization algorithm.
///
/// A scheme is configured once (through a
/// [`ParamStore`](mesh_params::ParamStore)) and is stateless across
/// invocations: calling [`Self::mesh_curve`] twice on the same curve yields
/// the same result, and independent curves may be meshed from different
/// threads as long as each uses its own scheme instance.
///
/// Curve schemes implement [`Self::mesh_curve`]; surface schemes implement
/// [`Self::mesh_surface`]. The defaults reject the other kind of geometry
/// with [`SchemeError::UnsupportedOperation`].
pub trait Scheme {
    /// The scheme's registered name.
    fn name(&self) -> &str;

    /// Discretize a curve into ordered nodes and segments.
    ///
    /// # Errors
    ///
    /// [`SchemeError::UnsupportedOperation`] unless overridden.
    fn mesh_curve(&self, curve: &dyn Curve) -> SchemeResult<CurveDiscretization> {
        let _ = curve;
        Err(SchemeError::UnsupportedOperation {
            scheme: self.name().to_string(),
            operation: "curve",
        })
    }

    /// Triangulate a surface domain.
    ///
    /// # Errors
    ///
    /// [`SchemeError::UnsupportedOperation`] unless overridden.
    fn mesh_surface(&self, domain: &SurfaceDomain) -> SchemeResult<SurfaceDiscretization> {
        let _ = domain;
        Err(SchemeError::UnsupportedOperation {
            scheme: self.name().to_string(),
            operation: "surface",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inert;

    impl Scheme for Inert {
        fn name(&self) -> &str {
            "inert"
        }
    }

    #[test]
    fn test_defaults_reject() {
        let scheme = Inert;
        let domain = SurfaceDomain::default();
        assert!(matches!(
            scheme.mesh_surface(&domain),
            Err(SchemeError::UnsupportedOperation {
                operation: "surface",
                ..
            })
        ));
    }
}
