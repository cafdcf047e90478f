//! Surface triangulation adapter.

use mesh_params::ParamStore;
use nalgebra::Point2;
use tracing::debug;

use crate::discretization::{SurfaceDiscretization, SurfaceDomain};
use crate::error::{SchemeError, SchemeResult};
use crate::scheme::Scheme;

/// Thin adapter delegating surface triangulation to the external Delaunay
/// library.
///
/// The boundary and hole loop vertices are triangulated as a point set;
/// triangles whose centroid falls outside the outer loop or inside a hole
/// are then discarded. Anything beyond that — refinement, interior vertex
/// insertion, quality control — is out of this adapter's scope.
///
/// # Example
///
/// ```
/// use mesh_scheme::{Scheme, SchemeTriSurf, SurfaceDomain};
/// use nalgebra::Point2;
///
/// let domain = SurfaceDomain::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ]);
///
/// let result = SchemeTriSurf::new().mesh_surface(&domain).unwrap();
/// assert_eq!(result.vertices.len(), 4);
/// assert_eq!(result.triangle_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemeTriSurf;

impl SchemeTriSurf {
    /// Create the adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Build the adapter from a parameter store (it takes no parameters;
    /// the signature exists for registry construction).
    ///
    /// # Errors
    ///
    /// Never fails today.
    pub fn from_params(_params: &ParamStore) -> SchemeResult<Self> {
        Ok(Self)
    }
}

impl Scheme for SchemeTriSurf {
    fn name(&self) -> &str {
        "trisurf"
    }

    fn mesh_surface(&self, domain: &SurfaceDomain) -> SchemeResult<SurfaceDiscretization> {
        let vertices = domain.boundary_points();
        if vertices.len() < 3 {
            return Err(SchemeError::DegenerateDomain(vertices.len()));
        }

        let flat: Vec<delaunator::Point> = vertices
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let triangulation = delaunator::triangulate(&flat);

        let mut triangles = Vec::with_capacity(triangulation.triangles.len() / 3);
        for tri in triangulation.triangles.chunks_exact(3) {
            let (a, b, c) = (vertices[tri[0]], vertices[tri[1]], vertices[tri[2]]);
            let centroid = Point2::new(
                (a.x + b.x + c.x) / 3.0,
                (a.y + b.y + c.y) / 3.0,
            );
            if !point_in_loop(&centroid, &domain.outer) {
                continue;
            }
            if domain.holes.iter().any(|hole| point_in_loop(&centroid, hole)) {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            triangles.push([tri[0] as u32, tri[1] as u32, tri[2] as u32]);
        }

        debug!(
            kept = triangles.len(),
            raw = triangulation.triangles.len() / 3,
            "triangulated surface domain"
        );
        Ok(SurfaceDiscretization {
            vertices,
            triangles,
        })
    }
}

/// Even-odd ray-cast point-in-polygon test.
fn point_in_loop(pt: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > pt.y) != (pj.y > pt.y)
            && pt.x < (pj.x - pi.x) * (pt.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_point_in_loop() {
        let square = unit_square();
        assert!(point_in_loop(&Point2::new(0.5, 0.5), &square));
        assert!(!point_in_loop(&Point2::new(1.5, 0.5), &square));
        assert!(!point_in_loop(&Point2::new(-0.1, -0.1), &square));
    }

    #[test]
    fn test_square_triangulation() {
        let result = SchemeTriSurf::new()
            .mesh_surface(&SurfaceDomain::new(unit_square()))
            .unwrap();
        assert_eq!(result.triangle_count(), 2);
        for tri in &result.triangles {
            assert!(tri.iter().all(|&i| (i as usize) < result.vertices.len()));
        }
    }

    #[test]
    fn test_degenerate_domain() {
        let domain = SurfaceDomain::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(matches!(
            SchemeTriSurf::new().mesh_surface(&domain),
            Err(SchemeError::DegenerateDomain(2))
        ));
    }

    #[test]
    fn test_hole_removes_triangles() {
        // Outer square with a square hole in the middle
        let outer = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        let hole = vec![
            Point2::new(1.5, 1.5),
            Point2::new(2.5, 1.5),
            Point2::new(2.5, 2.5),
            Point2::new(1.5, 2.5),
        ];
        let with_hole = SchemeTriSurf::new()
            .mesh_surface(&SurfaceDomain::new(outer).with_hole(hole))
            .unwrap();
        assert!(with_hole.triangle_count() > 0);
        // No kept triangle has its centroid inside the hole
        for tri in &with_hole.triangles {
            let (a, b, c) = (
                with_hole.vertices[tri[0] as usize],
                with_hole.vertices[tri[1] as usize],
                with_hole.vertices[tri[2] as usize],
            );
            let centroid = Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
            assert!(
                !(centroid.x > 1.5 && centroid.x < 2.5 && centroid.y > 1.5 && centroid.y < 2.5)
            );
        }
    }

    #[test]
    fn test_curve_dispatch_rejected() {
        use curve_traits::{Curve, Line};
        use nalgebra::Point3;
        let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
        let _ = &line as &dyn Curve;
        assert!(matches!(
            SchemeTriSurf::new().mesh_curve(&line),
            Err(SchemeError::UnsupportedOperation {
                operation: "curve",
                ..
            })
        ));
    }
}
