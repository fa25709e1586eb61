//! Hydrators: field extraction from domain objects
//!
//! A [`Hydrator`] turns an [`Instance`] into the data map of a resource.
//! Strategies resolve hydrators by name through a [`HydratorLocator`], lazily,
//! only when the metadata they are handling names one.

use crate::{HalError, Instance, DEFAULT_EXTRACTOR};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

/// Extracts a field map from an instance.
pub trait Hydrator: Send + Sync + Debug {
    /// Extract the data fields of `instance`.
    ///
    /// # Errors
    ///
    /// Implementations return [`HalError::Hydration`] when the instance does
    /// not have the shape they expect.
    fn extract(&self, instance: &Instance) -> Result<Map<String, Value>, HalError>;
}

/// Resolves hydrators by name.
///
/// Implemented for [`Hydrators`] and for any
/// `Fn(&str) -> Option<Arc<dyn Hydrator>>`.
pub trait HydratorLocator: Send + Sync {
    /// The hydrator registered as `name`, if any.
    fn hydrator(&self, name: &str) -> Option<Arc<dyn Hydrator>>;

    /// Resolve `name`, failing with [`HalError::UnknownHydrator`].
    ///
    /// # Errors
    ///
    /// [`HalError::UnknownHydrator`] when nothing is registered under `name`.
    fn require(&self, name: &str) -> Result<Arc<dyn Hydrator>, HalError> {
        self.hydrator(name).ok_or_else(|| HalError::UnknownHydrator {
            name: name.to_owned(),
        })
    }
}

impl<F> HydratorLocator for F
where
    F: Fn(&str) -> Option<Arc<dyn Hydrator>> + Send + Sync,
{
    fn hydrator(&self, name: &str) -> Option<Arc<dyn Hydrator>> {
        self(name)
    }
}

/// Returns every serialized field unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyHydrator;

impl Hydrator for PropertyHydrator {
    fn extract(&self, instance: &Instance) -> Result<Map<String, Value>, HalError> {
        Ok(instance.fields().clone())
    }
}

type HydratorFactory = Box<dyn Fn() -> Arc<dyn Hydrator> + Send + Sync>;

struct Entry {
    factory: HydratorFactory,
    instance: OnceLock<Arc<dyn Hydrator>>,
}

/// Name → hydrator table with lazy, once-only construction.
///
/// Factories run the first time a name is resolved; later lookups share the
/// same instance.
///
/// # Example
///
/// ```
/// use halogen::{HydratorLocator, Hydrators, PropertyHydrator};
///
/// let hydrators = Hydrators::new().with("app.Property", || PropertyHydrator);
/// assert!(hydrators.hydrator("app.Property").is_some());
/// assert!(hydrators.hydrator("app.Missing").is_none());
/// ```
#[derive(Default)]
pub struct Hydrators {
    entries: HashMap<String, Entry>,
}

impl Hydrators {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding [`PropertyHydrator`] under [`DEFAULT_EXTRACTOR`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new().with(DEFAULT_EXTRACTOR, || PropertyHydrator)
    }

    /// Register a factory under `name` (builder pattern).
    #[must_use]
    pub fn with<H, F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        H: Hydrator + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        self.insert(name, factory);
        self
    }

    /// Register a factory under `name`, replacing any earlier one.
    pub fn insert<H, F>(&mut self, name: impl Into<String>, factory: F)
    where
        H: Hydrator + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        self.entries.insert(
            name.into(),
            Entry {
                factory: Box::new(move || Arc::new(factory()) as Arc<dyn Hydrator>),
                instance: OnceLock::new(),
            },
        );
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names (sorted).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl HydratorLocator for Hydrators {
    fn hydrator(&self, name: &str) -> Option<Arc<dyn Hydrator>> {
        let entry = self.entries.get(name)?;
        Some(Arc::clone(entry.instance.get_or_init(|| (entry.factory)())))
    }
}

impl Debug for Hydrators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hydrators")
            .field("names", &self.names())
            .finish()
    }
}
