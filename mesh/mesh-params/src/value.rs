//! Parameter values and the typed access trait.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parameter value: one of the closed set of supported types.
///
/// The store is deliberately a tagged union rather than a type-erased box,
/// so retrieval is a plain match with no runtime type machinery.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Real(f64),
    /// String value.
    Str(String),
}

impl ParamValue {
    /// Human-readable name of the contained type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Real(_) => "real",
            Self::Str(_) => "string",
        }
    }
}

/// Types storable in a [`ParamStore`](crate::ParamStore).
///
/// Implemented exactly for `bool`, `i64`, `f64`, and `String`. There is no
/// coercion between them: a value stored as `f64` is not retrievable as
/// `i64`, by design.
pub trait ParamType: Clone {
    /// Wrap the value into a [`ParamValue`].
    fn into_value(self) -> ParamValue;

    /// Borrow the typed value back out, if the variant matches.
    fn from_value(value: &ParamValue) -> Option<&Self>;
}

impl ParamType for bool {
    fn into_value(self) -> ParamValue {
        ParamValue::Bool(self)
    }

    fn from_value(value: &ParamValue) -> Option<&Self> {
        match value {
            ParamValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl ParamType for i64 {
    fn into_value(self) -> ParamValue {
        ParamValue::Int(self)
    }

    fn from_value(value: &ParamValue) -> Option<&Self> {
        match value {
            ParamValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl ParamType for f64 {
    fn into_value(self) -> ParamValue {
        ParamValue::Real(self)
    }

    fn from_value(value: &ParamValue) -> Option<&Self> {
        match value {
            ParamValue::Real(v) => Some(v),
            _ => None,
        }
    }
}

impl ParamType for String {
    fn into_value(self) -> ParamValue {
        ParamValue::Str(self)
    }

    fn from_value(value: &ParamValue) -> Option<&Self> {
        match value {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let v = 2.5f64.into_value();
        assert_eq!(f64::from_value(&v), Some(&2.5));
        assert_eq!(i64::from_value(&v), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(true.into_value().type_name(), "bool");
        assert_eq!(3i64.into_value().type_name(), "int");
        assert_eq!(1.0f64.into_value().type_name(), "real");
        assert_eq!(String::from("x").into_value().type_name(), "string");
    }
}
