//! `ResourceGenerator`: metadata lookup and strategy dispatch
//!
//! # Dispatch
//!
//! ```text
//! from_object(&T, &Request)
//!     ↓ serialize            (non-object → InvalidObject)
//! Instance { type_name, fields }
//!     ↓ MetadataMap::get     (unmapped type → InvalidObject)
//! Metadata
//!     ↓ strategies[kind]     (no strategy → UnknownMetadataType)
//! Strategy::create_resource  (errors returned unchanged)
//!     ↓
//! Resource
//! ```
//!
//! # Registration
//!
//! Strategies are registered through `&mut self`, so registration cannot race
//! dispatch. Configure the generator first, then share it (e.g. behind an
//! `Arc`) for read-only use.

use crate::{
    GeneratorConfig, HalEntity, HalError, HydratorLocator, Instance, InvalidObject, Link, LinkGenerator,
    MetadataKind, MetadataMap, Request, Resource, RouteBasedResourceStrategy, Strategy,
    StrategyCatalog, UnknownMetadataType, UrlBasedResourceStrategy,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds HAL resources from plain maps and from domain objects.
///
/// # Example
///
/// ```
/// use halogen::prelude::*;
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct NoRoutes;
///
/// impl UrlGenerator for NoRoutes {
///     fn generate(&self, _: &Request, route: &str, _: &Params, _: &Params) -> Result<String, HalError> {
///         Err(HalError::UrlGeneration { route: route.into(), reason: "no routes".into() })
///     }
/// }
///
/// #[derive(serde::Serialize)]
/// struct Ping { ok: bool }
///
/// impl HalEntity for Ping {
///     const TYPE_NAME: &'static str = "app::Ping";
/// }
///
/// let mut metadata = MetadataMap::new();
/// metadata.insert_for::<Ping>(UrlBasedResourceMetadata::new("Ping", "/ping"));
///
/// let generator = ResourceGenerator::new(
///     metadata,
///     Hydrators::with_defaults(),
///     LinkGenerator::new(NoRoutes),
/// );
///
/// let resource = generator.from_object(&Ping { ok: true }, &Request::default()).unwrap();
/// assert_eq!(
///     serde_json::to_value(&resource).unwrap(),
///     json!({ "ok": true, "_links": { "self": { "href": "/ping" } } })
/// );
/// ```
pub struct ResourceGenerator {
    metadata_map: MetadataMap,
    hydrators: Arc<dyn HydratorLocator>,
    links: LinkGenerator,
    strategies: HashMap<MetadataKind, Arc<dyn Strategy>>,
}

impl ResourceGenerator {
    /// Create a generator with the built-in strategies registered:
    ///
    /// - `UrlBasedResource` → [`UrlBasedResourceStrategy`]
    /// - `RouteBasedResource` → [`RouteBasedResourceStrategy`]
    pub fn new(
        metadata_map: MetadataMap,
        hydrators: impl HydratorLocator + 'static,
        links: LinkGenerator,
    ) -> Self {
        Self::with_shared_hydrators(metadata_map, Arc::new(hydrators), links)
    }

    /// Like [`new`](Self::new), sharing an existing hydrator locator.
    #[must_use]
    pub fn with_shared_hydrators(
        metadata_map: MetadataMap,
        hydrators: Arc<dyn HydratorLocator>,
        links: LinkGenerator,
    ) -> Self {
        let mut generator = Self {
            metadata_map,
            hydrators,
            links,
            strategies: HashMap::new(),
        };
        generator.add_strategy(MetadataKind::UrlBasedResource, UrlBasedResourceStrategy);
        generator.add_strategy(MetadataKind::RouteBasedResource, RouteBasedResourceStrategy);
        generator
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Registration
    // ───────────────────────────────────────────────────────────────────────────

    /// Register `strategy` for metadata of `kind`, replacing any earlier one.
    pub fn add_strategy(&mut self, kind: MetadataKind, strategy: impl Strategy + 'static) {
        self.add_strategy_arc(kind, Arc::new(strategy));
    }

    /// Register a shared strategy for metadata of `kind`, replacing any earlier one.
    pub fn add_strategy_arc(&mut self, kind: MetadataKind, strategy: Arc<dyn Strategy>) {
        tracing::debug!(metadata_type = %kind, strategy = ?strategy, "registering strategy");
        self.strategies.insert(kind, strategy);
    }

    /// Register a strategy by name.
    ///
    /// `metadata_type` is validated before `strategy`, so an unknown metadata
    /// type is reported even when the strategy name is also wrong.
    ///
    /// # Errors
    ///
    /// - [`UnknownMetadataType::InvalidType`]: `metadata_type` is not a metadata type URL
    /// - [`HalError::InvalidStrategy`]: `strategy` is not in `catalog`
    pub fn add_strategy_by_name(
        &mut self,
        metadata_type: &str,
        strategy: &str,
        catalog: &StrategyCatalog,
    ) -> Result<(), HalError> {
        let kind: MetadataKind = metadata_type.parse()?;
        let strategy = catalog.instantiate(strategy)?;
        self.add_strategy_arc(kind, strategy);
        Ok(())
    }

    /// Apply every strategy registration in `config`, in order.
    ///
    /// Stops at the first invalid entry; entries before it stay applied.
    ///
    /// # Errors
    ///
    /// Same as [`add_strategy_by_name()`](Self::add_strategy_by_name).
    pub fn apply_config(
        &mut self,
        config: &GeneratorConfig,
        catalog: &StrategyCatalog,
    ) -> Result<(), HalError> {
        for entry in &config.strategies {
            self.add_strategy_by_name(&entry.metadata_type, &entry.strategy, catalog)?;
        }
        tracing::debug!(
            applied = config.strategies.len(),
            registered = self.strategies.len(),
            "applied generator config"
        );
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Generation
    // ───────────────────────────────────────────────────────────────────────────

    /// Wrap a plain field map into a resource.
    ///
    /// When `uri` is given, the resource gets exactly one link: `self` → `uri`.
    /// Values are not validated.
    #[must_use]
    pub fn from_array(&self, data: Map<String, Value>, uri: Option<&str>) -> Resource {
        let resource = Resource::new(data);
        match uri {
            Some(uri) => resource.with_link(Link::self_link(uri)),
            None => resource,
        }
    }

    /// Build the resource for a domain object.
    ///
    /// The object's type identifier is [`HalEntity::TYPE_NAME`], which
    /// references and boxes forward to the inner type. A unit struct becomes a
    /// resource with empty data.
    ///
    /// # Errors
    ///
    /// - [`InvalidObject::NonObject`]: `instance` serializes to a scalar or a sequence
    /// - [`InvalidObject::UnknownType`]: `T` has no metadata
    /// - [`UnknownMetadataType::NoStrategy`]: no strategy for the metadata's kind
    /// - any error from the strategy, unchanged
    pub fn from_object<T: HalEntity + ?Sized>(
        &self,
        instance: &T,
        request: &Request,
    ) -> Result<Resource, HalError> {
        let instance = Instance::from_serialize(instance)?;
        self.from_instance(&instance, request)
    }

    /// Build the resource for an already-erased instance.
    ///
    /// # Errors
    ///
    /// Same as [`from_object()`](Self::from_object), minus serialization.
    pub fn from_instance(
        &self,
        instance: &Instance,
        request: &Request,
    ) -> Result<Resource, HalError> {
        let metadata = self
            .metadata_map
            .get(instance.type_name())
            .ok_or_else(|| InvalidObject::UnknownType {
                type_name: instance.type_name().to_owned(),
            })?;

        let kind = metadata.kind();
        let strategy = self
            .strategies
            .get(&kind)
            .ok_or_else(|| UnknownMetadataType::NoStrategy {
                metadata_type: kind.type_url().to_owned(),
                entity_type: metadata.entity_type().to_owned(),
            })?;

        tracing::trace!(
            entity_type = instance.type_name(),
            metadata_type = %kind,
            "dispatching to strategy"
        );
        strategy.create_resource(
            instance,
            metadata,
            self.hydrators.as_ref(),
            &self.links,
            request,
        )
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Introspection
    // ───────────────────────────────────────────────────────────────────────────

    /// Returns `true` if a strategy is registered for `kind`.
    #[must_use]
    pub fn has_strategy(&self, kind: MetadataKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// The strategy registered for `kind`.
    #[must_use]
    pub fn strategy(&self, kind: MetadataKind) -> Option<&Arc<dyn Strategy>> {
        self.strategies.get(&kind)
    }

    /// Returns the number of registered strategies.
    #[must_use]
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Metadata type URLs that have a strategy (sorted).
    #[must_use]
    pub fn metadata_types(&self) -> Vec<&'static str> {
        let mut urls: Vec<&'static str> = self.strategies.keys().map(|k| k.type_url()).collect();
        urls.sort_unstable();
        urls
    }

    /// The metadata map.
    #[must_use]
    pub fn metadata_map(&self) -> &MetadataMap {
        &self.metadata_map
    }

    /// The link generator handed to strategies.
    #[must_use]
    pub fn link_generator(&self) -> &LinkGenerator {
        &self.links
    }
}

impl std::fmt::Debug for ResourceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceGenerator")
            .field("metadata_map", &self.metadata_map)
            .field("links", &self.links)
            .field("strategies", &self.metadata_types())
            .finish_non_exhaustive()
    }
}
