use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use arbor_value::ValueKind;

use crate::attr::{Attr, AttrIter, AttrIterable, Primitive};
use crate::convert;
use crate::error::{Direction, DispatchExhausted, SerialError, ValueError};
use crate::object::{AttributeSet, Declare, FromValue};
use crate::registry::{Capability, DeserializeRule, Registry, RuleKey, SerializeRule};
use crate::{Serializable, Value};

/// A text value that also advertises iteration over its bytes.
struct Word(String);

impl Attr for Word {
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Str(&self.0))
    }

    fn as_iterable(&self) -> Option<&dyn AttrIterable> {
        Some(self)
    }
}

impl AttrIterable for Word {
    fn attr_len(&self) -> usize {
        self.0.len()
    }

    fn attr_iter(&self) -> AttrIter<'_> {
        Box::new(self.0.as_bytes().iter().map(|b| b as &dyn Attr))
    }
}

/// A cell that is a number when filled and opaque when empty.
#[derive(Debug, PartialEq)]
struct Cell(Option<i64>);

impl Attr for Cell {
    fn primitive(&self) -> Option<Primitive<'_>> {
        self.0.map(Primitive::Int)
    }
}

impl FromValue for Cell {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        i64::from_value(value).map(|n| Cell(Some(n)))
    }
}

#[derive(Serializable)]
struct Inner {
    c: Vec<Cell>,
}

#[derive(Serializable)]
struct Outer {
    b: Inner,
}

/// An object that can also be walked as a list of its items.
struct Bag {
    label: String,
    items: Vec<i64>,
}

impl Attr for Bag {
    fn as_serializable(&self) -> Option<&dyn Serializable> {
        Some(self)
    }

    fn as_iterable(&self) -> Option<&dyn AttrIterable> {
        Some(self)
    }
}

impl AttrIterable for Bag {
    fn attr_len(&self) -> usize {
        self.items.len()
    }

    fn attr_iter(&self) -> AttrIter<'_> {
        Box::new(self.items.iter().map(|n| n as &dyn Attr))
    }
}

impl Serializable for Bag {
    fn type_path(&self) -> &'static str {
        "tests::Bag"
    }

    fn attrs(&self) -> AttributeSet {
        AttributeSet::only(&["label", "items"])
    }

    fn bound_attrs(&self) -> Vec<(&'static str, &dyn Attr)> {
        vec![
            ("label", &self.label as &dyn Attr),
            ("items", &self.items as &dyn Attr),
        ]
    }
}

#[test]
fn capability_marker_wins_over_iteration() {
    let registry = Registry::new();
    let bag = Bag {
        label: "odd".to_string(),
        items: vec![1, 3],
    };

    let value = convert::serialize(&bag, &registry).unwrap();
    let Some(map) = value.as_map() else {
        panic!("expected a map, got {value:?}");
    };
    assert_eq!(map.get("label"), Some(&Value::from("odd")));
    assert_eq!(map.get("items"), Some(&Value::from(vec![Value::from(1), Value::from(3)])));

    // Without the object rule the same value is a plain sequence.
    let mut registry = Registry::new();
    registry.remove_serializer(&RuleKey::Capability(Capability::Serializable));
    assert_eq!(
        convert::serialize(&bag, &registry).unwrap(),
        Value::from(vec![Value::from(1), Value::from(3)])
    );
}

#[test]
fn strings_are_never_iterated() {
    let registry = Registry::new();
    let word = Word("hi".to_string());
    assert_eq!(convert::serialize(&word, &registry).unwrap(), Value::from("hi"));

    let plain = String::from("abc");
    assert_eq!(convert::serialize(&plain, &registry).unwrap(), Value::from("abc"));
}

#[test]
fn opaque_value_reports_its_path() {
    let mut registry = Registry::new();
    registry.declare::<Inner>().unwrap();
    registry.declare::<Outer>().unwrap();

    let outer = Outer {
        b: Inner {
            c: vec![Cell(Some(1)), Cell(Some(2)), Cell(None)],
        },
    };

    match outer.serialize(&registry) {
        Err(SerialError::Dispatch(DispatchExhausted {
            direction, path, ..
        })) => {
            assert_eq!(direction, Direction::Serialize);
            assert_eq!(path, "$.b.c[2]");
        }
        other => panic!("expected a dispatch error, got {other:?}"),
    }
}

#[test]
fn empty_registry_rejects_every_node() {
    let registry = Registry::empty();
    match convert::deserialize(Value::Null, &registry) {
        Err(SerialError::Dispatch(err)) => {
            assert_eq!(err.direction, Direction::Deserialize);
            assert_eq!(err.type_name, "null");
            assert_eq!(err.path, "$");
        }
        other => panic!("expected a dispatch error, got {other:?}"),
    }
}

#[test]
fn override_replaces_in_place() {
    let mut registry = Registry::new();
    let keys_before: Vec<RuleKey> = registry.serializers().map(|r| *r.key()).collect();

    let old = registry.register_serializer(SerializeRule::capability(
        Capability::Iterable,
        |value, converter| match value.as_iterable() {
            Some(iterable) => Ok(Value::from(iterable.attr_len())),
            None => Err(converter.exhausted(Direction::Serialize, value.attr_type_name())),
        },
    ));
    assert!(old.is_some());

    let keys_after: Vec<RuleKey> = registry.serializers().map(|r| *r.key()).collect();
    assert_eq!(keys_before, keys_after);

    let value = convert::serialize(&vec![7_u8, 8, 9], &registry).unwrap();
    assert_eq!(value, Value::from(3));
}

#[test]
fn registries_are_independent() {
    let mut custom = Registry::new();
    custom.insert_serializer_before(
        RuleKey::Capability(Capability::Serializable),
        SerializeRule::for_type(|flag: &bool, _| {
            Ok(Value::from(if *flag { "yes" } else { "no" }))
        }),
    );
    let baseline = Registry::new();

    assert_eq!(convert::serialize(&true, &custom).unwrap(), Value::from("yes"));
    assert_eq!(convert::serialize(&true, &baseline).unwrap(), Value::from(true));
}

#[test]
fn deserialize_rule_runs_before_construction() {
    #[derive(Serializable, Debug, PartialEq)]
    struct Port {
        port: u32,
    }

    let mut registry = Registry::new();
    registry.declare::<Port>().unwrap();
    registry.insert_deserializer_before(
        RuleKey::Kind(ValueKind::Map),
        DeserializeRule::predicate(
            "hex",
            |value| value.as_str().is_some_and(|s| s.starts_with("0x")),
            |value, converter| {
                let digits = value.as_str().map(|s| s.trim_start_matches("0x"));
                match digits.and_then(|d| u64::from_str_radix(d, 16).ok()) {
                    Some(n) => Ok(Value::from(n)),
                    None => Err(converter.exhausted(Direction::Deserialize, "hex string")),
                }
            },
        ),
    );

    let mut map = crate::ValueMap::new();
    map.insert("port", "0x10");
    assert_eq!(Port::deserialize(map, &registry).unwrap(), Port { port: 16 });

    let tree: Value = vec![Value::from("0xff"), Value::from(2)].into();
    let xs: Vec<u16> = convert::deserialize_into(tree, &registry).unwrap();
    assert_eq!(xs, [255, 2]);
}
