//! `Resource`: the HAL envelope: data, links, embedded resources
//!
//! A `Resource` is an immutable value. Every `with_*` method consumes the
//! resource and returns a new one, so a resource handed out by the
//! [`ResourceGenerator`](crate::ResourceGenerator) can never change behind the
//! caller's back.

use crate::instance::json_kind;
use crate::{HalError, InvalidObject, Link};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Reserved HAL key for links.
const LINKS_KEY: &str = "_links";

/// Reserved HAL key for embedded resources.
const EMBEDDED_KEY: &str = "_embedded";

/// A HAL resource.
///
/// # Link ordering
///
/// Links keep their append order. Duplicates are allowed; [`link`](Self::link)
/// returns the first one added for a relation.
///
/// # Example
///
/// ```
/// use halogen::{Link, Resource};
/// use serde_json::json;
///
/// let resource = Resource::from_value(json!({ "id": 1 }))
///     .unwrap()
///     .with_link(Link::self_link("/items/1"));
///
/// assert_eq!(resource.link("self").map(Link::href), Some("/items/1"));
/// assert_eq!(
///     serde_json::to_value(&resource).unwrap(),
///     json!({ "id": 1, "_links": { "self": { "href": "/items/1" } } })
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    data: Map<String, Value>,
    links: Vec<Link>,
    embedded: BTreeMap<String, Vec<Resource>>,
}

impl Resource {
    /// Create a resource with no links.
    #[must_use]
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            links: Vec::new(),
            embedded: BTreeMap::new(),
        }
    }

    /// Create a resource from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidObject::NonObject`] unless `value` is an object.
    pub fn from_value(value: Value) -> Result<Self, HalError> {
        match value {
            Value::Object(data) => Ok(Self::new(data)),
            other => Err(InvalidObject::NonObject {
                found: json_kind(&other),
            }
            .into()),
        }
    }

    /// Return a new resource with `link` appended.
    #[must_use]
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Return a new resource with `name` set to `value` in its data.
    #[must_use]
    pub fn with_element(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    /// Return a new resource with `resource` embedded under `name`.
    ///
    /// Embedding twice under the same name produces a collection.
    #[must_use]
    pub fn with_embedded(mut self, name: impl Into<String>, resource: Resource) -> Self {
        self.embedded.entry(name.into()).or_default().push(resource);
        self
    }

    /// The data fields.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// A single data field.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// All links, in append order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The first link with the given relation.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.rel() == rel)
    }

    /// Every link with the given relation, in append order.
    pub fn links_by_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.rel() == rel)
    }

    /// Resources embedded under `name`.
    #[must_use]
    pub fn embedded(&self, name: &str) -> &[Resource] {
        self.embedded.get(name).map_or(&[], Vec::as_slice)
    }

    /// Names of embedded collections (sorted).
    pub fn embedded_names(&self) -> impl Iterator<Item = &str> {
        self.embedded.keys().map(String::as_str)
    }

    /// Consume the resource, returning its data map.
    #[must_use]
    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    /// Group links by relation, preserving the order in which relations first appear.
    fn grouped_links(&self) -> Vec<(&str, Vec<&Link>)> {
        let mut groups: Vec<(&str, Vec<&Link>)> = Vec::new();
        for link in &self.links {
            match groups.iter_mut().find(|(rel, _)| *rel == link.rel()) {
                Some((_, members)) => members.push(link),
                None => groups.push((link.rel(), vec![link])),
            }
        }
        groups
    }
}

/// Grouped links for one relation: a single object, or an array when repeated.
struct RelLinks<'a>(&'a [&'a Link]);

impl Serialize for RelLinks<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            [single] => single.serialize(serializer),
            many => serializer.collect_seq(many.iter()),
        }
    }
}

struct LinksObject<'a>(&'a [(&'a str, Vec<&'a Link>)]);

impl Serialize for LinksObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (rel, links) in self.0 {
            map.serialize_entry(rel, &RelLinks(links))?;
        }
        map.end()
    }
}

/// Renders HAL JSON.
///
/// Data fields sit at the top level. Data keys named `_links` or `_embedded`
/// are dropped since HAL reserves them.
impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let groups = self.grouped_links();
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in &self.data {
            if name != LINKS_KEY && name != EMBEDDED_KEY {
                map.serialize_entry(name, value)?;
            }
        }
        if !groups.is_empty() {
            map.serialize_entry(LINKS_KEY, &LinksObject(&groups))?;
        }
        if !self.embedded.is_empty() {
            map.serialize_entry(EMBEDDED_KEY, &self.embedded)?;
        }
        map.end()
    }
}
