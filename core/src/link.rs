//! `Link`: a named hypermedia relation
//!
//! A link pairs a relation name (`self`, `next`, `item`, ...) with a target URI
//! or URI template. Links are immutable values; attach them to a
//! [`Resource`](crate::Resource) with [`Resource::with_link`](crate::Resource::with_link).

use crate::HalError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Relation name used for the canonical link of a resource.
pub const SELF_REL: &str = "self";

/// A hypermedia link: relation + target.
///
/// # Invariant
///
/// `rel` is never empty. [`Link::new`] rejects an empty relation with
/// [`HalError::InvalidLink`].
///
/// # Example
///
/// ```
/// use halogen::Link;
///
/// let link = Link::new("next", "/items?page=2").unwrap();
/// assert_eq!(link.rel(), "next");
/// assert!(!link.is_templated());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    rel: String,
    href: String,
    templated: bool,
    attributes: Map<String, Value>,
}

impl Link {
    /// Create a link.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidLink`] if `rel` is empty or only whitespace.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Result<Self, HalError> {
        let rel = rel.into();
        if rel.trim().is_empty() {
            return Err(HalError::InvalidLink {
                reason: "relation must be a non-empty string".into(),
            });
        }
        Ok(Self {
            rel,
            href: href.into(),
            templated: false,
            attributes: Map::new(),
        })
    }

    /// Create a `self` link. Infallible since the relation is fixed.
    pub fn self_link(href: impl Into<String>) -> Self {
        Self {
            rel: SELF_REL.to_owned(),
            href: href.into(),
            templated: false,
            attributes: Map::new(),
        }
    }

    /// Mark the target as an RFC 6570 URI template.
    #[must_use]
    pub fn templated(mut self, templated: bool) -> Self {
        self.templated = templated;
        self
    }

    /// Attach an extra attribute (`type`, `title`, `name`, `hreflang`, ...).
    ///
    /// `href` and `templated` are reserved and silently ignored here.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if name != "href" && name != "templated" {
            self.attributes.insert(name, value.into());
        }
        self
    }

    /// The relation name.
    #[must_use]
    pub fn rel(&self) -> &str {
        &self.rel
    }

    /// The target URI or URI template.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Whether `href` is a URI template.
    #[must_use]
    pub fn is_templated(&self) -> bool {
        self.templated
    }

    /// Extra attributes.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

/// Renders the HAL link object: `{ "href": ..., "templated": true, ...attributes }`.
///
/// The relation is not part of the object; it is the key under `_links`.
impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.templated) + self.attributes.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("href", &self.href)?;
        if self.templated {
            map.serialize_entry("templated", &true)?;
        }
        for (name, value) in &self.attributes {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
