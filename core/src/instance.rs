//! `Instance`: type-erased view of a domain object
//!
//! Strategies never see the caller's concrete type. The generator serializes
//! the object once and hands strategies an [`Instance`]: the type identifier
//! used for metadata lookup plus the serialized field map that hydrators read.

use crate::{HalError, InvalidObject};
use serde::Serialize;
use serde_json::{Map, Value};

/// A domain type the generator can build resources for.
///
/// `TYPE_NAME` is the type's identity in the [`MetadataMap`](crate::MetadataMap).
/// References and boxes forward to the inner type, so `&Book`, `&&Book` and
/// `Box<Book>` all resolve to `Book`'s metadata.
///
/// ```
/// use halogen::HalEntity;
///
/// #[derive(serde::Serialize)]
/// struct Book { id: u32 }
///
/// impl HalEntity for Book {
///     const TYPE_NAME: &'static str = "app::Book";
/// }
///
/// assert_eq!(<&Box<Book>>::TYPE_NAME, "app::Book");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a HAL entity",
    label = "no metadata identity for this type",
    note = "implement `HalEntity` with a `TYPE_NAME` matching its metadata `entity_type`"
)]
pub trait HalEntity: Serialize {
    /// Type identifier used as the metadata map key.
    const TYPE_NAME: &'static str;
}

impl<T: HalEntity + ?Sized> HalEntity for &T {
    const TYPE_NAME: &'static str = T::TYPE_NAME;
}

impl<T: HalEntity + ?Sized> HalEntity for &mut T {
    const TYPE_NAME: &'static str = T::TYPE_NAME;
}

impl<T: HalEntity + ?Sized> HalEntity for Box<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;
}

/// A domain object reduced to its type identifier and fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    type_name: String,
    fields: Map<String, Value>,
}

impl Instance {
    /// Build an instance directly from a type identifier and fields.
    pub fn new(type_name: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Serialize `value` into an instance keyed by [`HalEntity::TYPE_NAME`].
    ///
    /// Field-less entities (unit structs) serialize to `null` and become an
    /// instance with no fields.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidObject::NonObject`] if `value` serializes to a scalar
    /// or a sequence, and [`InvalidObject::Unserializable`] if serialization
    /// itself fails.
    pub fn from_serialize<T: HalEntity + ?Sized>(value: &T) -> Result<Self, HalError> {
        let value = serde_json::to_value(value).map_err(|e| InvalidObject::Unserializable {
            type_name: T::TYPE_NAME.to_owned(),
            message: e.to_string(),
        })?;
        match value {
            Value::Null => Ok(Self::new(T::TYPE_NAME, Map::new())),
            other => Self::from_value(T::TYPE_NAME, other),
        }
    }

    /// Build an instance from an already-serialized value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidObject::NonObject`] unless `value` is a JSON object.
    pub fn from_value(type_name: impl Into<String>, value: Value) -> Result<Self, HalError> {
        match value {
            Value::Object(fields) => Ok(Self::new(type_name, fields)),
            other => Err(InvalidObject::NonObject {
                found: json_kind(&other),
            }
            .into()),
        }
    }

    /// The type identifier.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The serialized fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// A single serialized field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
