//! The recursive converter.
//!
//! A [`Converter`] walks a value, asks the [`Registry`] for the first rule
//! that accepts each node, and lets that rule recurse back into the
//! converter for the node's children. The converter itself knows nothing
//! about particular types.
//!
//! - [`serialize`]: raw value to tree.
//! - [`deserialize`]: tree to normalized tree.
//! - [`deserialize_into`]: tree to a concrete Rust type.

pub(crate) mod trail;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use arbor_value::{Value, ValueMap};

use crate::attr::{Attr, AttrEntries};
use crate::error::{Direction, DispatchExhausted, SerialError};
use crate::object::{FromValue, Serializable, project};
use crate::registry::Registry;

use trail::Trail;

// -----------------------------------------------------------------------------
// Converter

/// Dispatches values to the rules of a [`Registry`], keeping track of where
/// in the tree it is.
///
/// Rules receive the converter and use it for their children, so nested
/// errors report the full path, such as `$.b.c[2]`.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    registry: &'a Registry,
    trail: Trail<'a>,
}

impl<'a> Converter<'a> {
    /// A converter positioned at the root of a tree.
    #[inline]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            trail: Trail::ROOT,
        }
    }

    #[inline]
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// The current location, rendered like `$.b.c[2]`.
    #[inline]
    pub fn path(&self) -> String {
        self.trail.render()
    }

    /// A converter for the entry `key` below the current node.
    #[inline]
    pub fn at_key<'b>(&'b self, key: &'b str) -> Converter<'b>
    where
        'a: 'b,
    {
        Converter {
            registry: self.registry,
            trail: self.trail.key(key),
        }
    }

    /// A converter for the element `index` below the current node.
    #[inline]
    pub fn at_index<'b>(&'b self, index: usize) -> Converter<'b>
    where
        'a: 'b,
    {
        Converter {
            registry: self.registry,
            trail: self.trail.index(index),
        }
    }

    /// Builds the error for a node that no rule accepts.
    pub fn exhausted(
        &self,
        direction: Direction,
        type_name: impl Into<Cow<'static, str>>,
    ) -> SerialError {
        let err = DispatchExhausted {
            direction,
            type_name: type_name.into(),
            path: self.trail.render(),
        };
        log::debug!("{err}");
        SerialError::Dispatch(err)
    }

    // -------------------------------------------------------------------------
    // Serialize

    /// Converts a raw value with the first serialize rule that accepts it.
    pub fn serialize(&self, value: &dyn Attr) -> Result<Value, SerialError> {
        let Some(rule) = self.registry.find_serializer(value) else {
            return Err(self.exhausted(Direction::Serialize, value.attr_type_name()));
        };
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "serialize `{}` at `{}` with {}",
                value.attr_type_name(),
                self.path(),
                rule.key()
            );
        }
        rule.apply(value, self)
    }

    /// Converts an object's projected attributes, in projection order.
    ///
    /// The attribute set comes from the object's descriptor when its type is
    /// declared in the registry, and from [`Serializable::attrs`] otherwise.
    pub fn serialize_object<S>(&self, object: &S) -> Result<ValueMap, SerialError>
    where
        S: Serializable + ?Sized,
    {
        // Dispatches through the vtable for `dyn Serializable`.
        let type_id = Any::type_id(object);
        let set = match self.registry.descriptor(type_id) {
            Some(descriptor) => Cow::Borrowed(descriptor.attribute_set()),
            None => {
                let own = object.attrs();
                own.validate(object.type_path())?;
                Cow::Owned(own)
            }
        };

        let projection = project(object, &set);
        let mut out = ValueMap::with_capacity(projection.len());
        for (name, value) in projection {
            let converted = self.at_key(name).serialize(value)?;
            out.insert(name, converted);
        }
        Ok(out)
    }

    /// Converts every element, in iteration order.
    pub fn serialize_seq<'v, I>(&self, items: I) -> Result<Value, SerialError>
    where
        I: IntoIterator<Item = &'v dyn Attr>,
    {
        let items = items.into_iter();
        let mut out = Vec::with_capacity(items.size_hint().0);
        for (index, item) in items.enumerate() {
            out.push(self.at_index(index).serialize(item)?);
        }
        Ok(Value::Seq(out))
    }

    /// Converts every entry value, keeping keys and their order.
    pub fn serialize_entries(&self, entries: AttrEntries<'_>) -> Result<ValueMap, SerialError> {
        let mut out = ValueMap::with_capacity(entries.size_hint().0);
        for (key, value) in entries {
            let converted = self.at_key(&key).serialize(value)?;
            out.insert(key.into_owned(), converted);
        }
        Ok(out)
    }

    // -------------------------------------------------------------------------
    // Deserialize

    /// Converts a tree node with the first deserialize rule that accepts it.
    pub fn deserialize(&self, value: Value) -> Result<Value, SerialError> {
        let Some(rule) = self.registry.find_deserializer(&value) else {
            return Err(self.exhausted(Direction::Deserialize, value.kind().as_str()));
        };
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "deserialize {} at `{}` with {}",
                value.kind(),
                self.path(),
                rule.key()
            );
        }
        rule.apply(value, self)
    }

    /// Converts every element, in order.
    pub fn deserialize_seq(&self, items: Vec<Value>) -> Result<Value, SerialError> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            out.push(self.at_index(index).deserialize(item)?);
        }
        Ok(Value::Seq(out))
    }

    /// Converts every entry value, keeping keys and their order.
    pub fn deserialize_map(&self, map: ValueMap) -> Result<ValueMap, SerialError> {
        let mut out = ValueMap::with_capacity(map.len());
        for (key, value) in map {
            let converted = self.at_key(&key).deserialize(value)?;
            out.insert(key, converted);
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// Entry points

/// Converts a raw value into a tree.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use arbor_serial::{Value, convert, registry::Registry};
///
/// let registry = Registry::new();
/// let raw = BTreeMap::from([("xs".to_string(), vec![1, 2]), ("ys".to_string(), vec![])]);
///
/// let tree = convert::serialize(&raw, &registry).unwrap();
/// assert_eq!(
///     arbor_serial::text::to_json_string(&tree).unwrap(),
///     r#"{"xs":[1,2],"ys":[]}"#,
/// );
/// ```
#[inline]
pub fn serialize(value: &dyn Attr, registry: &Registry) -> Result<Value, SerialError> {
    Converter::new(registry).serialize(value)
}

/// Normalizes a tree through the deserialize rules.
#[inline]
pub fn deserialize(value: Value, registry: &Registry) -> Result<Value, SerialError> {
    Converter::new(registry).deserialize(value)
}

/// Normalizes a tree, then reads it as `T`.
///
/// # Examples
///
/// ```
/// use arbor_serial::{Value, convert, registry::Registry};
///
/// let tree: Value = vec![Value::from(1), Value::from(2)].into();
/// let xs: Vec<u8> = convert::deserialize_into(tree, &Registry::new()).unwrap();
/// assert_eq!(xs, [1, 2]);
/// ```
pub fn deserialize_into<T: FromValue>(value: Value, registry: &Registry) -> Result<T, SerialError> {
    let value = deserialize(value, registry)?;
    Ok(T::from_value(value)?)
}
