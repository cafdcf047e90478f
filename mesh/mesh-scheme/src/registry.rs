//! Name-to-constructor scheme registry.

use hashbrown::HashMap;
use mesh_params::ParamStore;
use tracing::debug;

use crate::equal::SchemeEqual;
use crate::error::{SchemeError, SchemeResult};
use crate::scheme::Scheme;
use crate::transfinite::{DensityLaw, SchemeTransfinite};
use crate::trisurf::SchemeTriSurf;

/// Builds a boxed scheme instance from a parameter store.
pub type BuildFn = fn(&ParamStore) -> SchemeResult<Box<dyn Scheme>>;

/// Handle to a scheme instance created by a [`SchemeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemeId(usize);

/// Maps scheme names to constructors and owns the instances it creates.
///
/// The registry is an explicit value owned by the meshing session — there is
/// no process-wide singleton, so independent sessions can register different
/// scheme sets. Creation requires `&mut self`: the exclusive borrow is what
/// serializes concurrent creation. Name lookups take `&self` and may run
/// concurrently.
///
/// # Example
///
/// ```
/// use curve_traits::Line;
/// use mesh_params::ParamStore;
/// use mesh_scheme::{Scheme, SchemeRegistry};
/// use nalgebra::Point3;
///
/// let mut registry = SchemeRegistry::with_builtin();
///
/// let mut params = ParamStore::new();
/// params.set("points", 3i64);
/// let id = registry.create("equal", &params).unwrap();
///
/// let line = Line::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();
/// let result = registry.scheme(id).unwrap().mesh_curve(&line).unwrap();
/// assert_eq!(result.node_count(), 5);
/// ```
#[derive(Default)]
pub struct SchemeRegistry {
    builders: HashMap<String, BuildFn>,
    instances: Vec<Box<dyn Scheme>>,
}

impl SchemeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in scheme registered.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("equal", |p| Ok(Box::new(SchemeEqual::from_params(p)?)));
        registry.register("transfinite", |p| {
            Ok(Box::new(SchemeTransfinite::from_typed_params(p)?))
        });
        registry.register("bias", |p| {
            let mut merged = SchemeTransfinite::default_params();
            merged.merge(p);
            let coef = merged.get::<f64>("coef")?;
            let orientation = merged.get::<i64>("orientation")?;
            Ok(Box::new(SchemeTransfinite::from_params(
                p,
                DensityLaw::Progression { coef, orientation },
            )?))
        });
        registry.register("bump", |p| {
            let mut merged = SchemeTransfinite::default_params();
            merged.merge(p);
            let coef = merged.get::<f64>("coef")?;
            Ok(Box::new(SchemeTransfinite::from_params(
                p,
                DensityLaw::Bump { coef },
            )?))
        });
        registry.register("beta-law", |p| {
            let mut merged = SchemeTransfinite::default_params();
            merged.merge(p);
            let coef = merged.get::<f64>("coef")?;
            let orientation = merged.get::<i64>("orientation")?;
            Ok(Box::new(SchemeTransfinite::from_params(
                p,
                DensityLaw::BetaLaw { coef, orientation },
            )?))
        });
        registry.register("sizemap", |p| {
            Ok(Box::new(SchemeTransfinite::from_params(
                p,
                DensityLaw::SizeMap {
                    field: std::sync::Arc::new(|_| 1.0),
                },
            )?))
        });
        registry.register("trisurf", |p| Ok(Box::new(SchemeTriSurf::from_params(p)?)));
        registry
    }

    /// Associate `name` with a constructor, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, build: BuildFn) {
        self.builders.insert(name.into(), build);
    }

    /// Whether a constructor is registered under `name`.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Build a new scheme instance, record it, and return its handle.
    ///
    /// # Errors
    ///
    /// [`SchemeError::UnknownScheme`] for an unregistered name; constructor
    /// errors propagate unchanged.
    pub fn create(&mut self, name: &str, params: &ParamStore) -> SchemeResult<SchemeId> {
        let build = self
            .builders
            .get(name)
            .ok_or_else(|| SchemeError::UnknownScheme(name.to_string()))?;
        let instance = build(params)?;
        debug!(name, "created scheme instance");
        self.instances.push(instance);
        Ok(SchemeId(self.instances.len() - 1))
    }

    /// Access a created instance by handle.
    #[must_use]
    pub fn scheme(&self, id: SchemeId) -> Option<&dyn Scheme> {
        self.instances.get(id.0).map(AsRef::as_ref)
    }

    /// Mutable access to a created instance by handle.
    #[must_use]
    pub fn scheme_mut(&mut self, id: SchemeId) -> Option<&mut (dyn Scheme + 'static)> {
        self.instances.get_mut(id.0).map(AsMut::as_mut)
    }

    /// Number of instances created and still owned.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Dispose every created instance, in reverse creation order.
    ///
    /// Safe to call repeatedly; handles issued earlier become dangling and
    /// [`Self::scheme`] returns `None` for them.
    pub fn destroy_all(&mut self) {
        while let Some(instance) = self.instances.pop() {
            drop(instance);
        }
    }
}
