//! Parametric curve interface for mesh discretization.
//!
//! This crate defines the [`Curve`] trait — the contract a geometry kernel
//! must satisfy for its curves to be discretized by the scheme framework —
//! together with two reference implementations used throughout the tests:
//!
//! - [`Line`] - Straight segment, parameter range `[0, 1]`
//! - [`CircularArc`] - Arc in the XY plane, parameterized by angle
//!
//! The trait deliberately exposes only what the schemes consume: position,
//! first derivative, curvature, total length, and the parameter range. The
//! kernel's own curve representation (NURBS, analytic, trimmed) stays behind
//! this seam.
//!
//! # Example
//!
//! ```
//! use curve_traits::{CircularArc, Curve};
//! use nalgebra::Point3;
//! use std::f64::consts::PI;
//!
//! let arc = CircularArc::new(Point3::origin(), 1.0, 0.0, PI).unwrap();
//!
//! // Half circle of unit radius
//! assert!((arc.length() - PI).abs() < 1e-12);
//!
//! // The parameter range is the angular interval, not [0, 1]
//! let (lo, hi) = arc.param_range();
//! assert_eq!((lo, hi), (0.0, PI));
//! ```
//!
//! # Layer 0 Crate
//!
//! No engine or I/O dependencies; usable from CLI tools, servers, and tests.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod arc;
mod error;
mod line;
mod traits;

pub use arc::CircularArc;
pub use error::{CurveError, CurveResult};
pub use line::Line;
pub use traits::Curve;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
