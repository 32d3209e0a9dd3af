use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use arbor_value::{Value, ValueMap};

use crate::convert::Converter;
use crate::error::{ConfigurationError, ConstructionError, SerialError, ValueError};
use crate::object::{Declare, FieldMap, Serializable};
use crate::registry::Registry;

/// Rebuilds a `T` from a map.
///
/// Every value is converted through the deserialize rules first. Keys that
/// are not constructor parameters of `T` are rejected before anything is
/// constructed; missing keys are left to [`FromValue::missing`].
///
/// [`FromValue::missing`]: crate::object::FromValue::missing
pub fn reconstruct<T: Declare>(map: ValueMap, registry: &Registry) -> Result<T, SerialError> {
    let values = Converter::new(registry).deserialize_map(map)?;
    Ok(construct::<T>(values)?)
}

/// Rebuilds an instance of the type declared under `type_path`.
pub fn reconstruct_dyn(
    type_path: &str,
    map: ValueMap,
    registry: &Registry,
) -> Result<Box<dyn Serializable>, SerialError> {
    match registry.get_with_type_path(type_path) {
        Some(descriptor) => descriptor.construct(map, registry),
        None => Err(ConfigurationError::UnknownTypePath {
            type_path: type_path.to_string(),
        }
        .into()),
    }
}

/// Reads a nested object out of an already converted tree node.
///
/// This is the [`FromValue`](crate::object::FromValue) implementation
/// generated for serializable types.
pub fn from_nested<T: Declare>(value: Value) -> Result<T, ValueError> {
    let map = value.into_map().map_err(|other| ConstructionError::NotAMap {
        type_path: T::TYPE_PATH,
        found: other.kind(),
    });
    map.and_then(construct::<T>)
        .map_err(|err| ValueError::Nested(Box::new(SerialError::Construction(err))))
}

fn construct<T: Declare>(values: ValueMap) -> Result<T, ConstructionError> {
    let parameters = T::parameters();
    let unknown: Vec<String> = values
        .keys()
        .filter(|key| !parameters.iter().any(|p| p == key))
        .map(ToString::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(ConstructionError::UnknownKeys {
            type_path: T::TYPE_PATH,
            keys: unknown,
        });
    }

    let mut fields = FieldMap::new(T::TYPE_PATH, values);
    let value = T::construct(&mut fields)?;
    fields.finish()?;
    Ok(value)
}
