//! Error types for parameter access.

use thiserror::Error;

/// Result type for parameter access.
pub type ParamResult<T> = Result<T, ParamError>;

/// Errors that can occur when retrieving parameters.
///
/// Requesting a stored value under the wrong type is deliberately the same
/// failure as requesting an absent name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// No parameter with the given name and type.
    #[error("no parameter '{0}' found")]
    NotFound(String),
}
