use alloc::boxed::Box;

use arbor_value::{Value, ValueMap};

use crate::convert::Converter;
use crate::error::{ConfigurationError, ConstructionError, SerialError, ValueError};
use crate::object::{Serializable, reconstruct_dyn};
use crate::registry::Registry;

/// Serializes an object wrapped in a single-entry map keyed by its type path.
///
/// # Examples
///
/// ```
/// use arbor_serial::Serializable;
/// use arbor_serial::object::{deserialize_tagged, serialize_tagged};
/// use arbor_serial::registry::Registry;
///
/// #[derive(Serializable, Debug, PartialEq)]
/// #[serial(type_path = "shapes::Circle")]
/// struct Circle {
///     r: f64,
/// }
///
/// let mut registry = Registry::new();
/// registry.declare::<Circle>().unwrap();
///
/// let tagged = serialize_tagged(&Circle { r: 1.5 }, &registry).unwrap();
/// let json = arbor_serial::text::to_json_string(&tagged).unwrap();
/// assert_eq!(json, r#"{"shapes::Circle":{"r":1.5}}"#);
///
/// let back = deserialize_tagged(tagged, &registry).unwrap();
/// assert_eq!(back.downcast_ref::<Circle>(), Some(&Circle { r: 1.5 }));
/// ```
pub fn serialize_tagged(object: &dyn Serializable, registry: &Registry) -> Result<Value, SerialError> {
    let inner = Converter::new(registry).serialize_object(object)?;
    let mut outer = ValueMap::with_capacity(1);
    outer.insert(object.type_path(), inner);
    Ok(Value::Map(outer))
}

/// Rebuilds an object from the form written by [`serialize_tagged`].
///
/// The tag is looked up as a full type path first, then as an unambiguous
/// short type name.
pub fn deserialize_tagged(
    value: Value,
    registry: &Registry,
) -> Result<Box<dyn Serializable>, SerialError> {
    let outer = value.into_map().map_err(|other| ValueError::Mismatch {
        expected: "single-entry map",
        found: other.kind(),
    })?;
    if outer.len() != 1 {
        return Err(ValueError::Length {
            expected: 1,
            found: outer.len(),
        }
        .into());
    }
    let Some((tag, inner)) = outer.into_iter().next() else {
        return Err(ValueError::Length { expected: 1, found: 0 }.into());
    };

    let descriptor = registry
        .get_with_type_path(&tag)
        .or_else(|| registry.get_with_type_name(&tag))
        .ok_or_else(|| ConfigurationError::UnknownTypePath { type_path: tag.clone() })?;

    match inner {
        Value::Map(map) => reconstruct_dyn(descriptor.type_path(), map, registry),
        other => Err(ConstructionError::NotAMap {
            type_path: descriptor.type_path(),
            found: other.kind(),
        }
        .into()),
    }
}
