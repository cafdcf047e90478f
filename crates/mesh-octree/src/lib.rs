//! Octree spatial index for mesh entity lookup.
//!
//! This crate answers "which element contains this point" over a set of
//! spatial elements, the query a mesher issues constantly while projecting
//! nodes and classifying geometry:
//!
//! - [`Octree`] - The index: centroid placement, bounding-box registration,
//!   and cached point queries
//! - [`SpatialElement`] - The capability trait indexed elements implement
//! - [`Aabb`] - Axis-aligned bounding box in world coordinates
//!
//! The tree is generic over the element type and never inspects it beyond
//! the three [`SpatialElement`] capabilities, so mesh cells, geometric
//! regions, and test fixtures index the same way.
//!
//! # Usage Pattern
//!
//! Build, insert a batch, call [`Octree::arrange`] once, then query:
//!
//! ```
//! use mesh_octree::{Aabb, Octree, SpatialElement};
//! use nalgebra::{Point3, Vector3};
//!
//! struct Cell(Aabb);
//!
//! impl SpatialElement for Cell {
//!     fn bounding_box(&self) -> Aabb {
//!         self.0
//!     }
//!     fn contains(&self, point: &Point3<f64>) -> bool {
//!         self.0.contains(point)
//!     }
//!     fn centroid(&self) -> Point3<f64> {
//!         self.0.center()
//!     }
//! }
//!
//! let world = Aabb::new(Point3::origin(), Point3::new(4.0, 4.0, 4.0));
//! let mut tree = Octree::new(8, world);
//!
//! let half = Vector3::new(0.5, 0.5, 0.5);
//! tree.insert(Cell(Aabb::from_center(Point3::new(1.0, 1.0, 1.0), half)));
//! tree.insert(Cell(Aabb::from_center(Point3::new(3.0, 3.0, 3.0), half)));
//! tree.arrange();
//!
//! assert!(tree.search(&Point3::new(1.2, 0.8, 1.0)).is_some());
//! assert!(tree.search_all(&Point3::new(2.0, 2.0, 2.0)).is_empty());
//! ```
//!
//! # Layer 0 Crate
//!
//! No engine or I/O dependencies; usable from CLI tools, servers, and tests.
//!
//! # Failure Model
//!
//! Queries for points in empty space are a normal `None`, not an error. An
//! element whose centroid falls outside the world box is dropped with a
//! [`tracing`] error and `insert` returns `false`; the index stays usable.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod element;
mod tree;

pub use bounds::Aabb;
pub use element::SpatialElement;
pub use tree::Octree;
