//! Error types for curve construction.

use thiserror::Error;

/// Result type for curve construction.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur when building a reference curve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// Radius must be positive.
    #[error("invalid radius: {0} (must be positive)")]
    InvalidRadius(f64),

    /// Endpoints coincide, leaving the curve without a direction.
    #[error("degenerate curve: endpoints coincide")]
    DegenerateEndpoints,

    /// The angular sweep is zero.
    #[error("degenerate arc: zero sweep angle")]
    ZeroSweep,
}
