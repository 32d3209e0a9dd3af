use arbor_value::Value;

use crate::error::{ConstructionError, SerialError};
use crate::object::Declare;
use crate::registry::global;

/// Conversions through the [global](crate::registry::global) registry.
///
/// Implemented for every [`Declare`] type.
///
/// # Examples
///
/// ```
/// use arbor_serial::{Serializable, SerializableExt};
///
/// #[derive(Serializable, Debug, PartialEq)]
/// #[serial(attrs(name, tags), auto_register)]
/// struct Item {
///     name: String,
///     tags: Vec<String>,
/// }
///
/// let item = Item { name: "bolt".into(), tags: vec!["m3".into()] };
/// let json = item.to_json().unwrap();
/// assert_eq!(json, r#"{"name":"bolt","tags":["m3"]}"#);
/// assert_eq!(Item::from_json(&json).unwrap(), item);
/// ```
pub trait SerializableExt: Declare {
    /// Serializes into a map node.
    fn to_dict(&self) -> Result<Value, SerialError> {
        Ok(Value::Map(self.serialize(global::registry())?))
    }

    /// Rebuilds from a map node.
    fn from_dict(value: Value) -> Result<Self, SerialError> {
        match value.into_map() {
            Ok(map) => Self::deserialize(map, global::registry()),
            Err(other) => Err(ConstructionError::NotAMap {
                type_path: Self::TYPE_PATH,
                found: other.kind(),
            }
            .into()),
        }
    }

    #[cfg(feature = "json")]
    fn to_json(&self) -> Result<alloc::string::String, SerialError> {
        crate::text::to_json_string(&self.to_dict()?)
    }

    #[cfg(feature = "json")]
    fn to_json_writer<W: std::io::Write>(&self, writer: W) -> Result<(), SerialError> {
        crate::text::to_json_writer(writer, &self.to_dict()?)
    }

    #[cfg(feature = "json")]
    fn from_json(text: &str) -> Result<Self, SerialError> {
        Self::from_dict(crate::text::from_json_str(text)?)
    }

    #[cfg(feature = "json")]
    fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self, SerialError> {
        Self::from_dict(crate::text::from_json_reader(reader)?)
    }
}

impl<T: Declare> SerializableExt for T {}
