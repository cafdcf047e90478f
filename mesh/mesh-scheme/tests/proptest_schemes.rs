//! Property-based tests for the curve schemes.
//!
//! These tests generate random lines, arcs, and scheme parameters and verify
//! the invariants every curve discretization must uphold: endpoint
//! inclusion, strictly increasing node parameters, and consecutive
//! segment connectivity.
//!
//! Run with: cargo test -p mesh-scheme -- proptest

use curve_traits::{CircularArc, Curve, Line};
use mesh_params::ParamStore;
use mesh_scheme::{DensityLaw, Scheme, SchemeEqual, SchemeTransfinite};
use nalgebra::Point3;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a non-degenerate line segment in a bounded box.
fn arb_line() -> impl Strategy<Value = Line> {
    let coord = -50.0..50.0f64;
    (
        prop::array::uniform3(coord.clone()),
        prop::array::uniform3(coord),
    )
        .prop_filter_map("distinct endpoints", |([ax, ay, az], [bx, by, bz])| {
            Line::new(Point3::new(ax, ay, az), Point3::new(bx, by, bz)).ok()
        })
}

/// Generate a circular arc with a positive radius and non-empty sweep.
fn arb_arc() -> impl Strategy<Value = CircularArc> {
    (0.1..20.0f64, 0.0..3.0f64, 0.1..6.0f64).prop_filter_map(
        "valid arc",
        |(radius, start, sweep)| {
            CircularArc::new(Point3::origin(), radius, start, start + sweep).ok()
        },
    )
}

fn arb_law() -> impl Strategy<Value = DensityLaw> {
    prop_oneof![
        Just(DensityLaw::ArcLength { coef: 1.0 }),
        (1.05..3.0f64, prop_oneof![Just(1i64), Just(-1i64)])
            .prop_map(|(coef, orientation)| DensityLaw::Progression { coef, orientation }),
        (0.05..0.9f64).prop_map(|coef| DensityLaw::Bump { coef }),
        (2.0..10.0f64, prop_oneof![Just(1i64), Just(-1i64)])
            .prop_map(|(coef, orientation)| DensityLaw::BetaLaw { coef, orientation }),
    ]
}

fn int_params(points: i64) -> ParamStore {
    let mut params = ParamStore::new();
    params.set("points", points);
    params
}

/// Assert the invariants shared by every curve discretization.
fn check_discretization(curve: &dyn Curve, scheme: &dyn Scheme, n_interior: usize) {
    let result = scheme.mesh_curve(curve).unwrap();
    let (lo, hi) = curve.param_range();

    assert_eq!(result.node_count(), n_interior + 2);
    assert_eq!(result.segment_count(), n_interior + 1);

    let params = &result.params;
    assert!((params[0] - lo).abs() < 1e-9, "first node off lo endpoint");
    assert!(
        (params[params.len() - 1] - hi).abs() < 1e-9,
        "last node off hi endpoint"
    );
    for pair in params.windows(2) {
        assert!(pair[0] < pair[1], "node parameters not increasing: {pair:?}");
    }
    for (i, seg) in result.segments.iter().enumerate() {
        assert_eq!(*seg, [i as u32, i as u32 + 1]);
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_equal_on_lines(line in arb_line(), points in 0i64..20) {
        let scheme = SchemeEqual::from_params(&int_params(points)).unwrap();
        check_discretization(&line, &scheme, points as usize);
    }

    #[test]
    fn prop_equal_on_arcs(arc in arb_arc(), points in 0i64..20) {
        let scheme = SchemeEqual::from_params(&int_params(points)).unwrap();
        check_discretization(&arc, &scheme, points as usize);
    }

    #[test]
    fn prop_transfinite_on_lines(line in arb_line(), points in 1i64..20, law in arb_law()) {
        let scheme = SchemeTransfinite::from_params(&int_params(points), law).unwrap();
        check_discretization(&line, &scheme, points as usize);
    }

    #[test]
    fn prop_transfinite_on_arcs(arc in arb_arc(), points in 1i64..20, law in arb_law()) {
        let scheme = SchemeTransfinite::from_params(&int_params(points), law).unwrap();
        check_discretization(&arc, &scheme, points as usize);
    }

    /// Uniform spacing on a straight line is uniform in parameter too.
    #[test]
    fn prop_equal_line_spacing(line in arb_line(), points in 1i64..12) {
        let scheme = SchemeEqual::from_params(&int_params(points)).unwrap();
        let result = scheme.mesh_curve(&line).unwrap();
        let step = 1.0 / (points as f64 + 1.0);
        for (i, t) in result.params.iter().enumerate() {
            let expected = step * i as f64;
            assert!((t - expected).abs() < 1e-6, "node {i}: {t} vs {expected}");
        }
    }
}
