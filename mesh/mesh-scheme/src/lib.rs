//! Discretization schemes for curves and surfaces.
//!
//! A *scheme* turns a parametric curve (or a boundary-defined surface
//! domain) into mesh nodes and connectivity. This crate provides:
//!
//! - [`Scheme`] - The dispatch trait every scheme implements
//! - [`SchemeRegistry`] - Name-to-constructor registry owning the instances
//!   it creates
//! - [`SchemeEqual`] - Uniformly spaced curve nodes, by linear solve or by
//!   arc-length integration
//! - [`SchemeTransfinite`] - Graded curve nodes under a [`DensityLaw`]
//!   (arc length, geometric progression, bump, beta-law, or an injected
//!   size field)
//! - [`SchemeTriSurf`] - Delaunay triangulation of a planar boundary loop
//!   with optional holes
//!
//! Schemes are configured through a
//! [`ParamStore`](mesh_params::ParamStore) and are stateless after
//! construction, so distinct curves can be meshed concurrently as long as
//! each thread works from its own instance.
//!
//! # Example
//!
//! ```
//! use curve_traits::Line;
//! use mesh_params::ParamStore;
//! use mesh_scheme::{Scheme, SchemeRegistry};
//! use nalgebra::Point3;
//!
//! let mut registry = SchemeRegistry::with_builtin();
//!
//! let mut params = ParamStore::new();
//! params.set("points", 4i64);
//! let id = registry.create("equal", &params).unwrap();
//!
//! let line = Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0)).unwrap();
//! let result = registry.scheme(id).unwrap().mesh_curve(&line).unwrap();
//!
//! // 4 interior nodes plus the two endpoints
//! assert_eq!(result.node_count(), 6);
//! assert_eq!(result.segment_count(), 5);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod discretization;
mod equal;
mod error;
mod registry;
mod scheme;
mod transfinite;
mod trisurf;

pub use discretization::{CurveDiscretization, SurfaceDiscretization, SurfaceDomain};
pub use equal::{EqualMethod, SchemeEqual};
pub use error::{SchemeError, SchemeResult};
pub use registry::{BuildFn, SchemeId, SchemeRegistry};
pub use scheme::Scheme;
pub use transfinite::{DensityLaw, SchemeTransfinite, SizeField};
pub use trisurf::SchemeTriSurf;
