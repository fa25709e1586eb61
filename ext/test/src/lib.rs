//! halogen-test: collaborators for exercising the resource generator
//!
//! Provides a template [`RouteTable`], a field-selecting hydrator and a
//! collection strategy, so generators can be wired up without a host
//! framework. The conformance fixtures and the `halogen` CLI both build on it.
//!
//! # Example
//!
//! ```
//! use halogen::prelude::*;
//! use halogen_test::prelude::*;
//!
//! #[derive(serde::Serialize)]
//! struct Book { id: u32, title: &'static str }
//!
//! impl HalEntity for Book {
//!     const TYPE_NAME: &'static str = "app::Book";
//! }
//!
//! let mut metadata = MetadataMap::new();
//! metadata.insert_for::<Book>(RouteBasedResourceMetadata::new("Book", "book"));
//!
//! let routes = RouteTable::new().route("book", "/books/{id}");
//! let generator = ResourceGenerator::new(metadata, Hydrators::with_defaults(), LinkGenerator::new(routes));
//!
//! let resource = generator.from_object(&Book { id: 4, title: "Emma" }, &Request::default()).unwrap();
//! assert_eq!(resource.link("self").map(Link::href), Some("/books/4"));
//! ```

use halogen::prelude::*;
use halogen::{PaginationParamType, UrlBasedCollectionMetadata};
use serde_json::{Map, Value};

mod routes;


pub use routes::RouteTable;

// ═══════════════════════════════════════════════════════════════════════════════
// Hydrators
// ═══════════════════════════════════════════════════════════════════════════════

/// Extracts a fixed set of fields, failing if any is missing.
#[derive(Debug, Clone, Default)]
pub struct FieldsHydrator {
    fields: Vec<String>,
}

impl FieldsHydrator {
    /// Name used in hydration errors.
    pub const NAME: &'static str = "halogen.test.v1.Fields";

    /// Select `fields`, in order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl Hydrator for FieldsHydrator {
    fn extract(&self, instance: &Instance) -> Result<Map<String, Value>, HalError> {
        self.fields
            .iter()
            .map(|name| {
                instance
                    .field(name)
                    .map(|value| (name.clone(), value.clone()))
                    .ok_or_else(|| HalError::Hydration {
                        hydrator: Self::NAME.to_owned(),
                        reason: format!("{} has no field \"{name}\"", instance.type_name()),
                    })
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Strategies
// ═══════════════════════════════════════════════════════════════════════════════

/// Collection strategy for [`UrlBasedCollectionMetadata`].
///
/// The instance's [`ITEMS_FIELD`](Self::ITEMS_FIELD) array is embedded under
/// the metadata's `collection_relation`; every other field stays in the data.
/// The `self` link is the collection URL, carrying the current page when the
/// request has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlCollectionStrategy;

impl UrlCollectionStrategy {
    /// Catalog name.
    pub const NAME: &'static str = "halogen.test.v1.UrlCollectionStrategy";

    /// Field holding the collection items.
    pub const ITEMS_FIELD: &'static str = "items";

    fn self_href(metadata: &UrlBasedCollectionMetadata, request: &Request) -> String {
        let page = request.query_param(&metadata.pagination_param);
        match metadata.pagination_param_type {
            PaginationParamType::Query => match page {
                Some(page) => {
                    let separator = if metadata.url.contains('?') { '&' } else { '?' };
                    format!(
                        "{}{separator}{}={}",
                        metadata.url,
                        metadata.pagination_param,
                        urlencoding::encode(page)
                    )
                }
                None => metadata.url.clone(),
            },
            PaginationParamType::Placeholder => metadata.url.replace(
                &format!("{{{}}}", metadata.pagination_param),
                page.unwrap_or("1"),
            ),
        }
    }
}

impl Strategy for UrlCollectionStrategy {
    fn create_resource(
        &self,
        instance: &Instance,
        metadata: &Metadata,
        _hydrators: &dyn HydratorLocator,
        _links: &LinkGenerator,
        request: &Request,
    ) -> Result<Resource, HalError> {
        let Metadata::UrlBasedCollection(metadata) = metadata else {
            return Err(HalError::UnexpectedMetadata {
                strategy: Self::NAME,
                expected: MetadataKind::UrlBasedCollection.type_url(),
                found: metadata.kind().type_url(),
            });
        };

        let mut data = instance.fields().clone();
        let items = match data.remove(Self::ITEMS_FIELD) {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(HalError::Hydration {
                    hydrator: Self::NAME.to_owned(),
                    reason: format!("\"{}\" is not an array", Self::ITEMS_FIELD),
                })
            }
        };

        let mut resource = Resource::new(data);
        for (i, item) in items.into_iter().enumerate() {
            let item = Resource::from_value(item).map_err(|e| HalError::Hydration {
                hydrator: Self::NAME.to_owned(),
                reason: format!("{}[{i}]: {e}", Self::ITEMS_FIELD),
            })?;
            resource = resource.with_embedded(metadata.collection_relation.as_str(), item);
        }
        Ok(resource.with_link(Link::self_link(Self::self_href(metadata, request))))
    }
}

/// Add this crate's strategies to `catalog`.
#[must_use]
pub fn register(catalog: StrategyCatalog) -> StrategyCatalog {
    catalog.strategy::<UrlCollectionStrategy>(UrlCollectionStrategy::NAME)
}

/// Built-in strategies plus this crate's.
#[must_use]
pub fn catalog() -> StrategyCatalog {
    register(StrategyCatalog::with_builtins())
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{catalog, register, FieldsHydrator, RouteTable, UrlCollectionStrategy};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instance(fields: Value) -> Instance {
        Instance::from_value("app::Shelf", fields).unwrap()
    }

    fn links() -> LinkGenerator {
        LinkGenerator::new(RouteTable::new())
    }

    #[test]
    fn test_fields_hydrator_selects() {
        let hydrator = FieldsHydrator::new(["title"]);
        let data = hydrator
            .extract(&instance(json!({ "id": 1, "title": "Emma" })))
            .unwrap();
        assert_eq!(Value::Object(data), json!({ "title": "Emma" }));
    }

    #[test]
    fn test_fields_hydrator_missing_field() {
        let err = FieldsHydrator::new(["isbn"])
            .extract(&instance(json!({ "id": 1 })))
            .unwrap_err();
        assert_eq!(
            err,
            HalError::Hydration {
                hydrator: FieldsHydrator::NAME.into(),
                reason: "app::Shelf has no field \"isbn\"".into(),
            }
        );
    }

    #[test]
    fn test_collection_embeds_items() {
        let metadata: Metadata =
            UrlBasedCollectionMetadata::new("app::Shelf", "books", "/books").into();
        let resource = UrlCollectionStrategy
            .create_resource(
                &instance(json!({ "count": 2, "items": [{ "id": 1 }, { "id": 2 }] })),
                &metadata,
                &Hydrators::with_defaults(),
                &links(),
                &Request::default(),
            )
            .unwrap();

        assert_eq!(resource.element("count"), Some(&json!(2)));
        assert!(resource.element("items").is_none());
        assert_eq!(resource.embedded("books").len(), 2);
        assert_eq!(resource.link("self").map(Link::href), Some("/books"));
    }

    #[test]
    fn test_collection_pagination() {
        let request = Request::builder().query_param("page", "3").build();

        let query: Metadata = UrlBasedCollectionMetadata::new("app::Shelf", "books", "/books").into();
        let resource = UrlCollectionStrategy
            .create_resource(&instance(json!({})), &query, &Hydrators::new(), &links(), &request)
            .unwrap();
        assert_eq!(resource.link("self").map(Link::href), Some("/books?page=3"));

        let mut placeholder =
            UrlBasedCollectionMetadata::new("app::Shelf", "books", "/books/page/{page}");
        placeholder.pagination_param_type = PaginationParamType::Placeholder;
        let resource = UrlCollectionStrategy
            .create_resource(
                &instance(json!({})),
                &placeholder.into(),
                &Hydrators::new(),
                &links(),
                &Request::default(),
            )
            .unwrap();
        assert_eq!(resource.link("self").map(Link::href), Some("/books/page/1"));
    }

    #[test]
    fn test_collection_pagination_appends_to_existing_query() {
        let request = Request::builder().query_param("page", "2").build();
        let metadata: Metadata =
            UrlBasedCollectionMetadata::new("app::Shelf", "books", "/books?genre=sf").into();
        let resource = UrlCollectionStrategy
            .create_resource(&instance(json!({})), &metadata, &Hydrators::new(), &links(), &request)
            .unwrap();
        assert_eq!(
            resource.link("self").map(Link::href),
            Some("/books?genre=sf&page=2")
        );
    }

    #[test]
    fn test_collection_rejects_non_object_items() {
        let metadata: Metadata =
            UrlBasedCollectionMetadata::new("app::Shelf", "books", "/books").into();
        let err = UrlCollectionStrategy
            .create_resource(
                &instance(json!({ "items": [{ "id": 1 }, 2] })),
                &metadata,
                &Hydrators::new(),
                &links(),
                &Request::default(),
            )
            .unwrap_err();
        match err {
            HalError::Hydration { hydrator, reason } => {
                assert_eq!(hydrator, UrlCollectionStrategy::NAME);
                assert!(reason.starts_with("items[1]: "), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collection_rejects_resource_metadata() {
        let metadata: Metadata = UrlBasedResourceMetadata::new("app::Shelf", "/shelf").into();
        let err = UrlCollectionStrategy
            .create_resource(
                &instance(json!({})),
                &metadata,
                &Hydrators::new(),
                &links(),
                &Request::default(),
            )
            .unwrap_err();
        assert!(matches!(err, HalError::UnexpectedMetadata { .. }));
    }

    #[test]
    fn test_catalog_includes_collection_strategy() {
        let catalog = catalog();
        assert!(catalog.contains(UrlCollectionStrategy::NAME));
        assert!(catalog.contains(UrlBasedResourceStrategy::NAME));
    }
}
