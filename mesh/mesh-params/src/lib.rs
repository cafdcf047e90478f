//! Type-checked named-value container for scheme configuration.
//!
//! A [`ParamStore`] maps names to values drawn from a closed set of types
//! (`bool`, `i64`, `f64`, `String`). Access is type-checked at the call
//! site and never coerces: requesting a stored real as an integer is the
//! same failure as requesting a name that was never set.
//!
//! # Example
//!
//! ```
//! use mesh_params::{ParamStore, ParamError};
//!
//! let mut params = ParamStore::new();
//! params.set("points", 4i64);
//! params.set("type", String::from("beta-law"));
//!
//! assert_eq!(params.get::<i64>("points").unwrap(), 4);
//! assert_eq!(params.get::<String>("type").unwrap(), "beta-law");
//!
//! // Wrong type behaves like an absent name
//! assert_eq!(
//!     params.get::<f64>("points"),
//!     Err(ParamError::NotFound("points".into())),
//! );
//! ```
//!
//! # Defaults vs. assignments
//!
//! Schemes [`declare`](ParamStore::declare) their parameters with defaults;
//! the entries exist but report [`is_valid`](ParamStore::is_valid) `==
//! false` until a caller [`set`](ParamStore::set)s them. Merging one store
//! into another ([`merge`](ParamStore::merge) or `+=`) overwrites matching
//! names and keeps the rest.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod store;
mod value;

pub use error::{ParamError, ParamResult};
pub use store::{Param, ParamStore};
pub use value::{ParamType, ParamValue};
