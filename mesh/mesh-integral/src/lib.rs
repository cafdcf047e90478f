//! Adaptive 1D integration of curve density functions.
//!
//! Discretization schemes decide where to put nodes by integrating a
//! *density function* along a curve: the cumulative primitive tells them how
//! much "mesh mass" lies before each parameter, and equal fractions of the
//! total give the node parameters. This crate provides that integrator:
//!
//! - [`Integral1d`] - Error-controlled recursive trapezoid refinement
//! - [`IntPoint`] - One recorded `(t, density, primitive, tangent norm)` sample
//!
//! The refinement bisects intervals until the trapezoid estimate stabilizes
//! (tolerance `1e-8`, after a minimum depth of 6), with a hard recursion cap
//! of 25 that guarantees termination on pathological densities. Both cutoffs
//! are silent accuracy policies, not error conditions.
//!
//! # Example
//!
//! ```
//! use curve_traits::{Curve, Line};
//! use mesh_integral::Integral1d;
//! use nalgebra::Point3;
//!
//! let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
//! let (lo, hi) = line.param_range();
//!
//! // Arclength density: |curve'| / length
//! let integral = Integral1d::integrate(&line, lo, hi, |c: &Line, u| {
//!     c.d1(u).norm() / c.length()
//! });
//!
//! // Normalized arclength integrates to 1
//! assert!((integral.value() - 1.0).abs() < 1e-8);
//! ```
//!
//! # Layer 0 Crate
//!
//! Depends only on the curve interface; no I/O, no engine coupling.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod integral;

pub use integral::{IntPoint, Integral1d};
