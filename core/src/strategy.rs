//! Strategies: metadata-specific resource construction
//!
//! A [`Strategy`] turns an [`Instance`] plus its [`Metadata`] into a
//! [`Resource`]. The [`ResourceGenerator`](crate::ResourceGenerator) picks the
//! strategy registered for the metadata's [`MetadataKind`](crate::MetadataKind).
//!
//! # Built-ins
//!
//! | Strategy | Handles | `self` link |
//! |----------|---------|-------------|
//! | [`UrlBasedResourceStrategy`] | `Metadata::UrlBasedResource` | literal `url` |
//! | [`RouteBasedResourceStrategy`] | `Metadata::RouteBasedResource` | `route` + params |
//!
//! # Registering by name
//!
//! [`StrategyCatalog`] maps strategy names to zero-argument factories, so
//! configuration files can refer to strategies by name.

use crate::{
    HalError, HydratorLocator, Instance, Link, LinkGenerator, Metadata, MetadataKind, Params,
    Request, Resource, SELF_REL,
};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Builds a resource for one metadata variant.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a resource strategy",
    label = "this type cannot build resources",
    note = "implement `Strategy::create_resource` to register it with a ResourceGenerator"
)]
pub trait Strategy: Send + Sync + Debug {
    /// Build the resource for `instance`.
    ///
    /// # Errors
    ///
    /// - [`HalError::UnexpectedMetadata`]: `metadata` is a variant this strategy does not handle
    /// - any hydrator or URL generator error, unchanged
    fn create_resource(
        &self,
        instance: &Instance,
        metadata: &Metadata,
        hydrators: &dyn HydratorLocator,
        links: &LinkGenerator,
        request: &Request,
    ) -> Result<Resource, HalError>;
}

impl<S: Strategy + ?Sized> Strategy for Arc<S> {
    fn create_resource(
        &self,
        instance: &Instance,
        metadata: &Metadata,
        hydrators: &dyn HydratorLocator,
        links: &LinkGenerator,
        request: &Request,
    ) -> Result<Resource, HalError> {
        (**self).create_resource(instance, metadata, hydrators, links, request)
    }
}

fn unexpected(strategy: &'static str, expected: MetadataKind, found: &Metadata) -> HalError {
    HalError::UnexpectedMetadata {
        strategy,
        expected: expected.type_url(),
        found: found.kind().type_url(),
    }
}

/// Render a data field as a route parameter. Strings are used verbatim.
fn param_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Built-in strategies
// ═══════════════════════════════════════════════════════════════════════════════

/// Strategy for [`UrlBasedResourceMetadata`](crate::UrlBasedResourceMetadata).
///
/// Data comes from the metadata's extractor; the `self` link is the literal URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlBasedResourceStrategy;

impl UrlBasedResourceStrategy {
    /// Catalog name.
    pub const NAME: &'static str = "halogen.strategy.v1.UrlBasedResourceStrategy";
}

impl Strategy for UrlBasedResourceStrategy {
    fn create_resource(
        &self,
        instance: &Instance,
        metadata: &Metadata,
        hydrators: &dyn HydratorLocator,
        _links: &LinkGenerator,
        _request: &Request,
    ) -> Result<Resource, HalError> {
        let Metadata::UrlBasedResource(metadata) = metadata else {
            return Err(unexpected(
                Self::NAME,
                MetadataKind::UrlBasedResource,
                metadata,
            ));
        };
        let data = hydrators.require(&metadata.extractor)?.extract(instance)?;
        Ok(Resource::new(data).with_link(Link::self_link(metadata.url.as_str())))
    }
}

/// Strategy for [`RouteBasedResourceMetadata`](crate::RouteBasedResourceMetadata).
///
/// Route parameters are the metadata's fixed `route_params`, plus the
/// identifier placeholder filled from the extracted data when the identifier
/// field is present and non-null.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteBasedResourceStrategy;

impl RouteBasedResourceStrategy {
    /// Catalog name.
    pub const NAME: &'static str = "halogen.strategy.v1.RouteBasedResourceStrategy";
}

impl Strategy for RouteBasedResourceStrategy {
    fn create_resource(
        &self,
        instance: &Instance,
        metadata: &Metadata,
        hydrators: &dyn HydratorLocator,
        links: &LinkGenerator,
        request: &Request,
    ) -> Result<Resource, HalError> {
        let Metadata::RouteBasedResource(metadata) = metadata else {
            return Err(unexpected(
                Self::NAME,
                MetadataKind::RouteBasedResource,
                metadata,
            ));
        };
        let data = hydrators.require(&metadata.extractor)?.extract(instance)?;

        let mut route_params = metadata.route_params.clone();
        if let Some(id) = data.get(&metadata.resource_identifier).and_then(param_value) {
            route_params.insert(metadata.route_identifier_placeholder.clone(), id);
        }

        let link = links.from_route(
            SELF_REL,
            request,
            &metadata.route,
            &route_params,
            &Params::new(),
        )?;
        Ok(Resource::new(data).with_link(link))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Catalog
// ═══════════════════════════════════════════════════════════════════════════════

type StrategyFactory = Box<dyn Fn() -> Arc<dyn Strategy> + Send + Sync>;

/// Strategy name → zero-argument factory.
///
/// # Example
///
/// ```
/// use halogen::{StrategyCatalog, UrlBasedResourceStrategy};
///
/// let catalog = StrategyCatalog::with_builtins();
/// assert!(catalog.contains(UrlBasedResourceStrategy::NAME));
/// assert!(catalog.instantiate("app.Missing").is_err());
/// ```
#[derive(Default)]
pub struct StrategyCatalog {
    factories: HashMap<String, StrategyFactory>,
}

impl StrategyCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the built-in strategies.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new()
            .strategy::<UrlBasedResourceStrategy>(UrlBasedResourceStrategy::NAME)
            .strategy::<RouteBasedResourceStrategy>(RouteBasedResourceStrategy::NAME)
    }

    /// Register a default-constructible strategy type under `name`.
    ///
    /// The concrete type `S` is monomorphized here and erased behind a closure.
    #[must_use]
    pub fn strategy<S: Strategy + Default + 'static>(self, name: &str) -> Self {
        self.factory(name, || S::default())
    }

    /// Register a factory under `name`.
    #[must_use]
    pub fn factory<S, F>(mut self, name: &str, factory: F) -> Self
    where
        S: Strategy + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.factories.insert(
            name.to_owned(),
            Box::new(move || Arc::new(factory()) as Arc<dyn Strategy>),
        );
        self
    }

    /// Construct the strategy registered as `name`.
    ///
    /// # Errors
    ///
    /// [`HalError::InvalidStrategy`] if no strategy is registered as `name`.
    pub fn instantiate(&self, name: &str) -> Result<Arc<dyn Strategy>, HalError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| HalError::InvalidStrategy {
                strategy: name.to_owned(),
                available: self.names().into_iter().map(str::to_owned).collect(),
            })?;
        Ok(factory())
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the number of registered strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no strategies are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered names (sorted).
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Debug for StrategyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyCatalog")
            .field("names", &self.names())
            .finish()
    }
}
