use alloc::vec::Vec;

use arbor_value::{Value, ValueKind};

use crate::attr::Attr;
use crate::error::Direction;
use crate::registry::{Capability, DeserializeRule, SerializeRule};

/// The serialize rules of [`Registry::new`](crate::registry::Registry::new),
/// highest priority first.
pub(crate) fn serialize_rules() -> [SerializeRule; 5] {
    [
        SerializeRule::capability(Capability::Serializable, |value, converter| {
            match value.as_serializable() {
                Some(object) => converter.serialize_object(object).map(Value::Map),
                None => Err(converter.exhausted(Direction::Serialize, value.attr_type_name())),
            }
        }),
        // Sets are materialized, then written as sequences.
        SerializeRule::capability(Capability::SetLike, |value, converter| {
            match value.as_set() {
                Some(set) => {
                    let items: Vec<&dyn Attr> = set.attr_iter().collect();
                    converter.serialize_seq(items)
                }
                None => Err(converter.exhausted(Direction::Serialize, value.attr_type_name())),
            }
        }),
        SerializeRule::capability(Capability::Iterable, |value, converter| {
            match value.as_iterable() {
                Some(iterable) => converter.serialize_seq(iterable.attr_iter()),
                None => Err(converter.exhausted(Direction::Serialize, value.attr_type_name())),
            }
        }),
        SerializeRule::capability(Capability::Mapping, |value, converter| {
            match value.as_mapping() {
                Some(mapping) => converter.serialize_entries(mapping.attr_entries()).map(Value::Map),
                None => Err(converter.exhausted(Direction::Serialize, value.attr_type_name())),
            }
        }),
        SerializeRule::capability(Capability::Primitive, |value, converter| {
            match value.primitive() {
                Some(primitive) => Ok(primitive.to_value()),
                None => Err(converter.exhausted(Direction::Serialize, value.attr_type_name())),
            }
        }),
    ]
}

/// The deserialize rules of [`Registry::new`](crate::registry::Registry::new),
/// highest priority first.
pub(crate) fn deserialize_rules() -> [DeserializeRule; 3] {
    [
        DeserializeRule::kind(ValueKind::Map, |value, converter| match value {
            Value::Map(map) => converter.deserialize_map(map).map(Value::Map),
            other => Ok(other),
        }),
        DeserializeRule::kind(ValueKind::Seq, |value, converter| match value {
            Value::Seq(seq) => converter.deserialize_seq(seq),
            other => Ok(other),
        }),
        DeserializeRule::predicate(
            "primitive",
            |value| value.kind().is_primitive(),
            |value, _| Ok(value),
        ),
    ]
}
