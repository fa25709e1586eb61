//! halogen - HAL resource generation
//!
//! Turns domain objects into HAL (Hypertext Application Language) resources:
//! data plus hypermedia links, ready to serialize as `application/hal+json`.
//!
//! # Architecture
//!
//! - [`Link`] / [`Resource`]: immutable HAL values; `Resource` serializes to HAL JSON
//! - [`Metadata`]: tagged union describing how a type is exposed (URL or route based)
//! - [`MetadataMap`]: type identifier → `Metadata`
//! - [`Strategy`]: builds a `Resource` for one [`MetadataKind`]
//! - [`ResourceGenerator`]: looks up metadata and dispatches to the registered strategy
//!
//! Hydration ([`HydratorLocator`]) and URI generation ([`UrlGenerator`]) are
//! collaborator seams supplied by the host application.
//!
//! # Example
//!
//! ```
//! use halogen::prelude::*;
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct Routes;
//!
//! impl UrlGenerator for Routes {
//!     fn generate(&self, _: &Request, route: &str, params: &Params, _: &Params) -> Result<String, HalError> {
//!         Ok(format!("/{route}/{}", params["id"]))
//!     }
//! }
//!
//! #[derive(serde::Serialize)]
//! struct Book { id: u32, title: String }
//!
//! impl HalEntity for Book {
//!     const TYPE_NAME: &'static str = "app::Book";
//! }
//!
//! let mut metadata = MetadataMap::new();
//! metadata.insert_for::<Book>(RouteBasedResourceMetadata::new("Book", "books"));
//!
//! let generator = ResourceGenerator::new(metadata, Hydrators::with_defaults(), LinkGenerator::new(Routes));
//! let book = Book { id: 7, title: "Dune".into() };
//! let resource = generator.from_object(&book, &Request::default()).unwrap();
//!
//! assert_eq!(
//!     serde_json::to_value(&resource).unwrap(),
//!     json!({ "id": 7, "title": "Dune", "_links": { "self": { "href": "/books/7" } } })
//! );
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod config;
mod generator;
mod hydrator;
mod instance;
mod link;
mod link_generator;
mod metadata;
mod metadata_map;
mod request;
mod resource;
mod strategy;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use config::{GeneratorConfig, StrategyConfig};
pub use generator::ResourceGenerator;
pub use hydrator::{Hydrator, HydratorLocator, Hydrators, PropertyHydrator};
pub use instance::{HalEntity, Instance};
pub use link::{Link, SELF_REL};
pub use link_generator::{LinkGenerator, UrlGenerator};
pub use metadata::{
    Metadata, MetadataKind, PaginationParamType, Params, RouteBasedCollectionMetadata,
    RouteBasedResourceMetadata, UrlBasedCollectionMetadata, UrlBasedResourceMetadata,
    DEFAULT_EXTRACTOR,
};
pub use metadata_map::MetadataMap;
pub use request::{Request, RequestBuilder, RouteMatch};
pub use resource::Resource;
pub use strategy::{RouteBasedResourceStrategy, Strategy, StrategyCatalog, UrlBasedResourceStrategy};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use halogen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        HalError,
        // Collaborators
        HalEntity,
        Hydrator,
        HydratorLocator,
        Hydrators,
        Instance,
        InvalidObject,
        // Values
        Link,
        LinkGenerator,
        // Metadata
        Metadata,
        MetadataKind,
        MetadataMap,
        Params,
        PropertyHydrator,
        Request,
        Resource,
        // Generation
        ResourceGenerator,
        RouteBasedResourceMetadata,
        RouteBasedResourceStrategy,
        Strategy,
        StrategyCatalog,
        UnknownMetadataType,
        UrlBasedResourceMetadata,
        UrlBasedResourceStrategy,
        UrlGenerator,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from strategy registration and resource generation.
///
/// The generator raises [`UnknownMetadataType`], [`InvalidStrategy`](Self::InvalidStrategy)
/// and [`InvalidObject`] itself. Every other variant comes from a strategy or
/// collaborator and reaches the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HalError {
    /// A metadata type is unknown, or has no strategy.
    #[error(transparent)]
    UnknownMetadataType(#[from] UnknownMetadataType),

    /// A strategy name is not registered in the catalog.
    #[error("invalid strategy \"{strategy}\"{}", registered(.available, "strategies"))]
    InvalidStrategy {
        /// The unresolvable strategy name.
        strategy: String,
        /// Strategy names that ARE registered.
        available: Vec<String>,
    },

    /// The value handed to `from_object` cannot be turned into a resource.
    #[error(transparent)]
    InvalidObject(#[from] InvalidObject),

    /// Metadata names a hydrator the locator does not know.
    #[error("unknown hydrator \"{name}\"")]
    UnknownHydrator {
        /// The requested hydrator name.
        name: String,
    },

    /// A hydrator could not extract fields.
    #[error("hydrator \"{hydrator}\" failed: {reason}")]
    Hydration {
        /// The hydrator name.
        hydrator: String,
        /// What went wrong.
        reason: String,
    },

    /// A strategy received a metadata variant it does not handle.
    #[error("strategy {strategy} expects {expected} but received {found}")]
    UnexpectedMetadata {
        /// The strategy name.
        strategy: &'static str,
        /// The metadata type it handles.
        expected: &'static str,
        /// The metadata type it received.
        found: &'static str,
    },

    /// The URL generator could not produce a URI.
    #[error("cannot generate URL for route \"{route}\": {reason}")]
    UrlGeneration {
        /// The route name.
        route: String,
        /// What went wrong (unknown route, missing parameter, ...).
        reason: String,
    },

    /// A link could not be built.
    #[error("invalid link: {reason}")]
    InvalidLink {
        /// What went wrong.
        reason: String,
    },

    /// Configuration deserialization failed.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// The underlying error message.
        message: String,
    },
}

/// A metadata type that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownMetadataType {
    /// Registration named something that is not a metadata type.
    #[error("unknown metadata type \"{metadata_type}\"{}", registered(.available, "metadata types"))]
    InvalidType {
        /// The name given at registration.
        metadata_type: String,
        /// Metadata type URLs that exist.
        available: Vec<String>,
    },

    /// Dispatch found metadata whose type has no registered strategy.
    #[error("no strategy registered for metadata {metadata_type} (describing {entity_type})")]
    NoStrategy {
        /// The metadata type URL.
        metadata_type: String,
        /// The entity type the metadata describes.
        entity_type: String,
    },
}

/// A value that cannot be turned into a resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidObject {
    /// The value is not object-like (a number, string, sequence, ...).
    #[error("expected an object, received {found}")]
    NonObject {
        /// The JSON kind the value serialized to.
        found: &'static str,
    },

    /// The object's type has no entry in the metadata map.
    #[error("unknown object type \"{type_name}\" — add metadata for it to the metadata map")]
    UnknownType {
        /// The type identifier.
        type_name: String,
    },

    /// The object failed to serialize.
    #[error("cannot serialize \"{type_name}\": {message}")]
    Unserializable {
        /// The type identifier.
        type_name: String,
        /// The serializer error message.
        message: String,
    },
}

/// `" — registered: a, b"` suffix for self-correcting error messages.
fn registered(available: &[String], what: &str) -> String {
    if available.is_empty() {
        format!(" — no {what} are registered")
    } else {
        format!(" — registered: {}", available.join(", "))
    }
}
