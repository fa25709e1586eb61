//! Metadata descriptors: how a domain type is exposed as a HAL resource
//!
//! [`Metadata`] is a tagged union over the supported descriptor shapes. Each
//! variant has a [`MetadataKind`] tag; the [`ResourceGenerator`](crate::ResourceGenerator)
//! keys its strategy registry by that tag.
//!
//! | Kind | Type URL | Built-in strategy |
//! |------|----------|-------------------|
//! | `UrlBasedResource` | `halogen.metadata.v1.UrlBasedResourceMetadata` | `UrlBasedResourceStrategy` |
//! | `RouteBasedResource` | `halogen.metadata.v1.RouteBasedResourceMetadata` | `RouteBasedResourceStrategy` |
//! | `UrlBasedCollection` | `halogen.metadata.v1.UrlBasedCollectionMetadata` | none |
//! | `RouteBasedCollection` | `halogen.metadata.v1.RouteBasedCollectionMetadata` | none |

use crate::{HalError, UnknownMetadataType};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Route or query parameters, name → value.
pub type Params = BTreeMap<String, String>;

/// Hydrator name used when metadata does not name one.
pub const DEFAULT_EXTRACTOR: &str = "halogen.hydrator.v1.Property";

// ═══════════════════════════════════════════════════════════════════════════════
// Kind tag
// ═══════════════════════════════════════════════════════════════════════════════

/// Tag identifying a [`Metadata`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetadataKind {
    /// [`UrlBasedResourceMetadata`]
    UrlBasedResource,
    /// [`RouteBasedResourceMetadata`]
    RouteBasedResource,
    /// [`UrlBasedCollectionMetadata`]
    UrlBasedCollection,
    /// [`RouteBasedCollectionMetadata`]
    RouteBasedCollection,
}

impl MetadataKind {
    /// Every kind, in declaration order.
    pub const ALL: [MetadataKind; 4] = [
        Self::UrlBasedResource,
        Self::RouteBasedResource,
        Self::UrlBasedCollection,
        Self::RouteBasedCollection,
    ];

    /// Stable type URL for this kind.
    #[must_use]
    pub const fn type_url(self) -> &'static str {
        match self {
            Self::UrlBasedResource => "halogen.metadata.v1.UrlBasedResourceMetadata",
            Self::RouteBasedResource => "halogen.metadata.v1.RouteBasedResourceMetadata",
            Self::UrlBasedCollection => "halogen.metadata.v1.UrlBasedCollectionMetadata",
            Self::RouteBasedCollection => "halogen.metadata.v1.RouteBasedCollectionMetadata",
        }
    }

    /// All type URLs (sorted), for error messages.
    #[must_use]
    pub fn type_urls() -> Vec<String> {
        let mut urls: Vec<String> = Self::ALL.iter().map(|k| k.type_url().to_owned()).collect();
        urls.sort_unstable();
        urls
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_url())
    }
}

impl FromStr for MetadataKind {
    type Err = HalError;

    /// Parse a type URL.
    ///
    /// # Errors
    ///
    /// [`UnknownMetadataType::InvalidType`] if `s` names no metadata kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.type_url() == s)
            .ok_or_else(|| {
                UnknownMetadataType::InvalidType {
                    metadata_type: s.to_owned(),
                    available: Self::type_urls(),
                }
                .into()
            })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Descriptors
// ═══════════════════════════════════════════════════════════════════════════════

fn default_extractor() -> String {
    DEFAULT_EXTRACTOR.to_owned()
}

fn default_identifier() -> String {
    "id".to_owned()
}

fn default_pagination_param() -> String {
    "page".to_owned()
}

/// A resource whose `self` link is a fixed URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UrlBasedResourceMetadata {
    /// Type identifier of the domain object.
    pub entity_type: String,
    /// Literal URL of the resource.
    pub url: String,
    /// Hydrator name used to extract the data fields.
    #[serde(default = "default_extractor")]
    pub extractor: String,
}

impl UrlBasedResourceMetadata {
    /// Create metadata using the default property extractor.
    pub fn new(entity_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            url: url.into(),
            extractor: default_extractor(),
        }
    }

    /// Use a named extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl Into<String>) -> Self {
        self.extractor = extractor.into();
        self
    }
}

/// A resource whose `self` link is generated from a named route.
///
/// The route placeholder `route_identifier_placeholder` is filled from the
/// extracted field `resource_identifier`, on top of the fixed `route_params`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteBasedResourceMetadata {
    /// Type identifier of the domain object.
    pub entity_type: String,
    /// Route name handed to the URL generator.
    pub route: String,
    /// Hydrator name used to extract the data fields.
    #[serde(default = "default_extractor")]
    pub extractor: String,
    /// Data field holding the resource identifier.
    #[serde(default = "default_identifier")]
    pub resource_identifier: String,
    /// Route placeholder that receives the identifier.
    #[serde(default = "default_identifier")]
    pub route_identifier_placeholder: String,
    /// Fixed route parameters.
    #[serde(default)]
    pub route_params: Params,
}

impl RouteBasedResourceMetadata {
    /// Create metadata with `id` as both identifier field and placeholder.
    pub fn new(entity_type: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            route: route.into(),
            extractor: default_extractor(),
            resource_identifier: default_identifier(),
            route_identifier_placeholder: default_identifier(),
            route_params: Params::new(),
        }
    }

    /// Use a named extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl Into<String>) -> Self {
        self.extractor = extractor.into();
        self
    }

    /// Read the identifier from `field` and place it in route placeholder `placeholder`.
    #[must_use]
    pub fn with_identifier(
        mut self,
        field: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        self.resource_identifier = field.into();
        self.route_identifier_placeholder = placeholder.into();
        self
    }

    /// Add a fixed route parameter.
    #[must_use]
    pub fn with_route_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.route_params.insert(name.into(), value.into());
        self
    }
}

/// Where the page number of a paginated collection goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationParamType {
    /// `?page=N`
    #[default]
    Query,
    /// A route placeholder.
    Placeholder,
}

/// A collection exposed at a fixed URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UrlBasedCollectionMetadata {
    /// Type identifier of the collection object.
    pub entity_type: String,
    /// Name the items are embedded under.
    pub collection_relation: String,
    /// Literal URL of the collection.
    pub url: String,
    /// Pagination parameter name.
    #[serde(default = "default_pagination_param")]
    pub pagination_param: String,
    /// Where the pagination parameter goes.
    #[serde(default)]
    pub pagination_param_type: PaginationParamType,
}

impl UrlBasedCollectionMetadata {
    /// Create metadata paginated by `?page=`.
    pub fn new(
        entity_type: impl Into<String>,
        collection_relation: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            collection_relation: collection_relation.into(),
            url: url.into(),
            pagination_param: default_pagination_param(),
            pagination_param_type: PaginationParamType::Query,
        }
    }
}

/// A collection exposed through a named route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteBasedCollectionMetadata {
    /// Type identifier of the collection object.
    pub entity_type: String,
    /// Name the items are embedded under.
    pub collection_relation: String,
    /// Route name handed to the URL generator.
    pub route: String,
    /// Pagination parameter name.
    #[serde(default = "default_pagination_param")]
    pub pagination_param: String,
    /// Where the pagination parameter goes.
    #[serde(default)]
    pub pagination_param_type: PaginationParamType,
    /// Fixed route parameters.
    #[serde(default)]
    pub route_params: Params,
    /// Fixed query string arguments.
    #[serde(default)]
    pub query_string_arguments: Params,
}

impl RouteBasedCollectionMetadata {
    /// Create metadata paginated by `?page=`.
    pub fn new(
        entity_type: impl Into<String>,
        collection_relation: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            collection_relation: collection_relation.into(),
            route: route.into(),
            pagination_param: default_pagination_param(),
            pagination_param_type: PaginationParamType::Query,
            route_params: Params::new(),
            query_string_arguments: Params::new(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Union
// ═══════════════════════════════════════════════════════════════════════════════

/// A metadata descriptor.
///
/// Deserializes with a `type` discriminator:
///
/// ```json
/// { "type": "url_based_resource", "entity_type": "app::Ping", "url": "/ping" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Metadata {
    /// See [`UrlBasedResourceMetadata`].
    UrlBasedResource(UrlBasedResourceMetadata),
    /// See [`RouteBasedResourceMetadata`].
    RouteBasedResource(RouteBasedResourceMetadata),
    /// See [`UrlBasedCollectionMetadata`].
    UrlBasedCollection(UrlBasedCollectionMetadata),
    /// See [`RouteBasedCollectionMetadata`].
    RouteBasedCollection(RouteBasedCollectionMetadata),
}

impl Metadata {
    /// The variant tag.
    #[must_use]
    pub fn kind(&self) -> MetadataKind {
        match self {
            Self::UrlBasedResource(_) => MetadataKind::UrlBasedResource,
            Self::RouteBasedResource(_) => MetadataKind::RouteBasedResource,
            Self::UrlBasedCollection(_) => MetadataKind::UrlBasedCollection,
            Self::RouteBasedCollection(_) => MetadataKind::RouteBasedCollection,
        }
    }

    /// Type identifier of the domain object this metadata describes.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        match self {
            Self::UrlBasedResource(m) => &m.entity_type,
            Self::RouteBasedResource(m) => &m.entity_type,
            Self::UrlBasedCollection(m) => &m.entity_type,
            Self::RouteBasedCollection(m) => &m.entity_type,
        }
    }

    /// Replace the type identifier.
    #[must_use]
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::UrlBasedResource(m) => &mut m.entity_type,
            Self::RouteBasedResource(m) => &mut m.entity_type,
            Self::UrlBasedCollection(m) => &mut m.entity_type,
            Self::RouteBasedCollection(m) => &mut m.entity_type,
        };
        *slot = entity_type.into();
        self
    }
}

impl From<UrlBasedResourceMetadata> for Metadata {
    fn from(m: UrlBasedResourceMetadata) -> Self {
        Self::UrlBasedResource(m)
    }
}

impl From<RouteBasedResourceMetadata> for Metadata {
    fn from(m: RouteBasedResourceMetadata) -> Self {
        Self::RouteBasedResource(m)
    }
}

impl From<UrlBasedCollectionMetadata> for Metadata {
    fn from(m: UrlBasedCollectionMetadata) -> Self {
        Self::UrlBasedCollection(m)
    }
}

impl From<RouteBasedCollectionMetadata> for Metadata {
    fn from(m: RouteBasedCollectionMetadata) -> Self {
        Self::RouteBasedCollection(m)
    }
}
