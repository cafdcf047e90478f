//! The named-parameter store.

use hashbrown::HashMap;

use crate::error::{ParamError, ParamResult};
use crate::value::{ParamType, ParamValue};

/// A single stored parameter: its value plus a validity flag.
///
/// A parameter declared with a default is present but *invalid* until a
/// caller explicitly assigns it; explicit assignment marks it valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The stored value.
    pub value: ParamValue,
    /// Whether the value was explicitly assigned (vs declared with default).
    pub valid: bool,
}

/// A mapping from names to typed parameter values.
///
/// A name maps to at most one value of one type at a time. `Clone` performs a
/// deep copy of every entry, and [`ParamStore::merge`] overwrites matching
/// names with the right-hand side's entries while keeping the rest.
///
/// # Example
///
/// ```
/// use mesh_params::ParamStore;
///
/// let mut params = ParamStore::new();
/// params.set("points", 5i64);
/// params.set("coef", 1.2f64);
///
/// assert_eq!(params.get::<i64>("points").unwrap(), 5);
/// assert!(params.has::<f64>("coef"));
///
/// // No coercion: the integer is not visible as a real
/// assert!(!params.has::<f64>("points"));
/// assert!(params.get::<f64>("points").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamStore {
    params: HashMap<String, Param>,
}

impl ParamStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a parameter, creating or overwriting the slot, and mark it
    /// valid.
    pub fn set<T: ParamType>(&mut self, name: impl Into<String>, value: T) -> &mut Self {
        self.params.insert(
            name.into(),
            Param {
                value: value.into_value(),
                valid: true,
            },
        );
        self
    }

    /// Declare a parameter with a default value, marked *invalid* until a
    /// caller assigns it with [`Self::set`].
    ///
    /// Declaring a name that already holds a value of the same type is a
    /// no-op, so scheme defaults never clobber caller-supplied settings.
    pub fn declare<T: ParamType>(&mut self, name: impl Into<String>, default: T) -> &mut Self {
        let name = name.into();
        if !self.has::<T>(&name) {
            self.params.insert(
                name,
                Param {
                    value: default.into_value(),
                    valid: false,
                },
            );
        }
        self
    }

    /// Retrieve a parameter value by name and type.
    ///
    /// # Errors
    ///
    /// [`ParamError::NotFound`] if the name is absent *or* holds a value of
    /// a different type.
    pub fn get<T: ParamType>(&self, name: &str) -> ParamResult<T> {
        self.params
            .get(name)
            .and_then(|p| T::from_value(&p.value))
            .cloned()
            .ok_or_else(|| ParamError::NotFound(name.to_string()))
    }

    /// Type-checked existence test.
    #[must_use]
    pub fn has<T: ParamType>(&self, name: &str) -> bool {
        self.params
            .get(name)
            .is_some_and(|p| T::from_value(&p.value).is_some())
    }

    /// Whether the named parameter was explicitly assigned.
    ///
    /// Returns `false` for absent names and for parameters still carrying
    /// their declared default.
    #[must_use]
    pub fn is_valid(&self, name: &str) -> bool {
        self.params.get(name).is_some_and(|p| p.valid)
    }

    /// Remove every parameter.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Number of stored parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Merge `other` into this store.
    ///
    /// Entries from `other` overwrite matching names (type included); names
    /// unique to either side are preserved.
    pub fn merge(&mut self, other: &Self) {
        for (name, param) in &other.params {
            self.params.insert(name.clone(), param.clone());
        }
    }

    /// Iterate over `(name, param)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl std::ops::AddAssign<&ParamStore> for ParamStore {
    fn add_assign(&mut self, rhs: &ParamStore) {
        self.merge(rhs);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing() {
        let params = ParamStore::new();
        assert_eq!(
            params.get::<i64>("i"),
            Err(ParamError::NotFound("i".to_string()))
        );
    }

    #[test]
    fn test_set_get() {
        let mut params = ParamStore::new();
        params.set("param", 12.34f64);
        assert_eq!(params.get::<f64>("param").unwrap(), 12.34);
    }

    #[test]
    fn test_wrong_type_is_not_found() {
        let mut params = ParamStore::new();
        params.set("param", 12.34f64);
        assert!(!params.has::<i64>("param"));
        assert_eq!(
            params.get::<i64>("param"),
            Err(ParamError::NotFound("param".to_string()))
        );
    }

    #[test]
    fn test_has_and_clear() {
        let mut params = ParamStore::new();
        params.set("param", 12.34f64);
        assert!(params.has::<f64>("param"));
        params.clear();
        assert!(!params.has::<f64>("param"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = ParamStore::new();
        original.set("param", String::from("alpha"));

        let mut copy = original.clone();
        copy.set("param", String::from("beta"));

        assert_eq!(original.get::<String>("param").unwrap(), "alpha");
        assert_eq!(copy.get::<String>("param").unwrap(), "beta");
    }

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let mut a = ParamStore::new();
        a.set("shared", 1i64);
        a.set("only-a", true);

        let mut b = ParamStore::new();
        b.set("shared", 2i64);
        b.set("only-b", 3.0f64);

        a += &b;
        assert_eq!(a.get::<i64>("shared").unwrap(), 2);
        assert_eq!(a.get::<bool>("only-a").unwrap(), true);
        assert_eq!(a.get::<f64>("only-b").unwrap(), 3.0);
    }

    #[test]
    fn test_declare_and_validity() {
        let mut params = ParamStore::new();
        params.declare("coef", 1.0f64);
        assert!(params.has::<f64>("coef"));
        assert!(!params.is_valid("coef"));
        assert_eq!(params.get::<f64>("coef").unwrap(), 1.0);

        params.set("coef", 2.0f64);
        assert!(params.is_valid("coef"));
        assert_eq!(params.get::<f64>("coef").unwrap(), 2.0);
    }

    #[test]
    fn test_declare_keeps_existing_value() {
        let mut params = ParamStore::new();
        params.set("points", 7i64);
        params.declare("points", 2i64);
        assert_eq!(params.get::<i64>("points").unwrap(), 7);
        assert!(params.is_valid("points"));
    }

    #[test]
    fn test_declare_replaces_other_type() {
        // A name holds one value of one type; declaring under a different
        // type claims the slot.
        let mut params = ParamStore::new();
        params.set("x", 1i64);
        params.declare("x", 1.5f64);
        assert!(params.has::<f64>("x"));
        assert!(!params.has::<i64>("x"));
    }
}
