//! Discretization results and the surface dispatch domain.

use curve_traits::Curve;
use nalgebra::{Point2, Point3};

/// The result of discretizing a curve: ordered node parameters, their
/// positions, and the connecting segments.
///
/// With `n` requested interior nodes the result holds `n + 2` parameters
/// (both boundary nodes included) and `n + 1` consecutive segments.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveDiscretization {
    /// Node parameters in increasing order, boundaries included.
    pub params: Vec<f64>,
    /// Node positions, one per parameter.
    pub points: Vec<Point3<f64>>,
    /// Segment connectivity as index pairs into `params`/`points`.
    pub segments: Vec<[u32; 2]>,
}

impl CurveDiscretization {
    /// Build a discretization from ordered node parameters by evaluating
    /// the curve at each and connecting consecutive nodes.
    #[must_use]
    pub fn from_params(curve: &dyn Curve, params: Vec<f64>) -> Self {
        let points = params.iter().map(|&u| curve.point(u)).collect();
        #[allow(clippy::cast_possible_truncation)]
        let segments = (0..params.len().saturating_sub(1))
            .map(|i| [i as u32, (i + 1) as u32])
            .collect();
        Self {
            params,
            points,
            segments,
        }
    }

    /// Number of nodes, boundaries included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.params.len()
    }

    /// Number of connecting segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

/// A 2D surface domain handed to a surface scheme: one outer boundary loop
/// and any number of hole loops, in the surface's parameter space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceDomain {
    /// The outer boundary loop, in order.
    pub outer: Vec<Point2<f64>>,
    /// Hole loops; triangles falling inside any of these are discarded.
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl SurfaceDomain {
    /// Create a domain from its outer boundary loop.
    #[must_use]
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Add a hole loop.
    #[must_use]
    pub fn with_hole(mut self, hole: Vec<Point2<f64>>) -> Self {
        self.holes.push(hole);
        self
    }

    /// All boundary points, outer loop first, then the hole loops.
    #[must_use]
    pub fn boundary_points(&self) -> Vec<Point2<f64>> {
        let mut pts = self.outer.clone();
        for hole in &self.holes {
            pts.extend_from_slice(hole);
        }
        pts
    }
}

/// The result of discretizing a surface: vertices in parameter space and
/// triangle connectivity.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDiscretization {
    /// Vertex positions in the surface's parameter space.
    pub vertices: Vec<Point2<f64>>,
    /// Triangle connectivity as index triples into `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

impl SurfaceDiscretization {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use curve_traits::Line;
    use nalgebra::Point3;

    #[test]
    fn test_from_params_connectivity() {
        let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
        let d = CurveDiscretization::from_params(&line, vec![0.0, 0.5, 1.0]);
        assert_eq!(d.node_count(), 3);
        assert_eq!(d.segment_count(), 2);
        assert_eq!(d.segments, vec![[0, 1], [1, 2]]);
        assert_eq!(d.points[1], Point3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_domain_boundary_points() {
        let domain = SurfaceDomain::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ])
        .with_hole(vec![Point2::new(0.2, 0.2)]);
        assert_eq!(domain.boundary_points().len(), 4);
    }
}
