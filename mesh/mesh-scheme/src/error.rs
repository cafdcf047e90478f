//! Error types for scheme configuration and execution.

use mesh_params::ParamError;
use thiserror::Error;

/// Result type for scheme operations.
pub type SchemeResult<T> = Result<T, SchemeError>;

/// Errors that can occur when creating or running a discretization scheme.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// The requested scheme name is not registered.
    #[error("unknown scheme '{0}'")]
    UnknownScheme(String),

    /// The uniform-spacing system could not be factorized.
    #[error("LU factorization failed")]
    FactorizationFailed,

    /// Back-substitution on the factorized system failed.
    #[error("linear solve failed")]
    SolveFailed,

    /// The scheme does not implement the requested kind of meshing.
    #[error("scheme '{scheme}' does not support {operation} meshing")]
    UnsupportedOperation {
        /// Name of the scheme.
        scheme: String,
        /// The operation kind ("curve" or "surface").
        operation: &'static str,
    },

    /// A parameter value is present but unusable.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// The surface domain has too few boundary points to triangulate.
    #[error("surface domain needs at least 3 boundary points, got {0}")]
    DegenerateDomain(usize),

    /// A required parameter is missing or mistyped.
    #[error(transparent)]
    Param(#[from] ParamError),
}
