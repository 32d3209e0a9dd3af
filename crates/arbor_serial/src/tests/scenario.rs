use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::object::Declare;
use crate::registry::Registry;
use crate::{Serializable, Value, ValueMap};

#[derive(Serializable, Debug, PartialEq)]
#[serial(attrs(b))]
struct B {
    b: String,
}

#[derive(Serializable, Debug, PartialEq)]
#[serial(attrs(a, b, c, d))]
struct A {
    a: i64,
    b: B,
    c: Vec<i64>,
    d: BTreeSet<i64>,
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.declare::<A>().unwrap();
    registry.declare::<B>().unwrap();
    registry
}

fn sample() -> A {
    A {
        a: 1,
        b: B { b: "x".to_string() },
        c: vec![1, 2, 3],
        d: BTreeSet::from([4]),
    }
}

fn expected() -> ValueMap {
    let mut b = ValueMap::new();
    b.insert("b", "x");

    let mut a = ValueMap::new();
    a.insert("a", 1);
    a.insert("b", b);
    a.insert("c", vec![Value::from(1), Value::from(2), Value::from(3)]);
    a.insert("d", vec![Value::from(4)]);
    a
}

#[test]
fn serialize_nested_object() {
    let registry = registry();
    let map = sample().serialize(&registry).unwrap();
    assert_eq!(map, expected());
}

#[test]
fn reconstruct_nested_object() {
    let registry = registry();
    let back = A::deserialize(expected(), &registry).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn round_trip_through_dyn() {
    let registry = registry();
    let object: &dyn Serializable = &sample();
    let map = object.serialize(&registry).unwrap();

    let rebuilt = registry
        .descriptor_of::<A>()
        .unwrap()
        .construct(map, &registry)
        .unwrap();
    assert_eq!(rebuilt.downcast_ref::<A>(), Some(&sample()));
}

#[test]
fn set_elements_are_written_as_sequence() {
    let registry = registry();
    let mut a = sample();
    a.d = BTreeSet::from([9, 3, 6]);

    let map = a.serialize(&registry).unwrap();
    let d = map.get("d").and_then(Value::as_seq).unwrap();
    assert_eq!(d, [Value::from(3), Value::from(6), Value::from(9)]);
}

#[cfg(feature = "std")]
#[test]
fn hash_set_round_trips_regardless_of_order() {
    use std::collections::HashSet;

    #[derive(Serializable, Debug, PartialEq)]
    struct Tags {
        tags: HashSet<i64>,
    }

    let mut registry = Registry::new();
    registry.declare::<Tags>().unwrap();

    let tags = Tags {
        tags: HashSet::from([5, 1, 3]),
    };
    let map = tags.serialize(&registry).unwrap();

    let mut seen: Vec<i64> = map
        .get("tags")
        .and_then(Value::as_seq)
        .unwrap()
        .iter()
        .filter_map(|v| v.as_number().and_then(|n| n.as_i64()))
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, [1, 3, 5]);

    assert_eq!(Tags::deserialize(map, &registry).unwrap(), tags);
}

#[test]
fn tree_travels_through_any_serde_format() {
    let registry = registry();
    let tree = Value::Map(sample().serialize(&registry).unwrap());

    let text = ron::to_string(&tree).unwrap();
    assert_eq!(text, r#"{"a":1,"b":{"b":"x"},"c":[1,2,3],"d":[4]}"#);

    let parsed: Value = ron::from_str(&text).unwrap();
    let back: A = crate::convert::deserialize_into(parsed, &registry).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn nested_type_needs_no_declaration() {
    let mut registry = Registry::new();
    registry.declare::<A>().unwrap();
    assert!(registry.descriptor_of::<B>().is_none());

    let map = sample().serialize(&registry).unwrap();
    assert_eq!(map, expected());
    assert_eq!(A::deserialize(map, &registry).unwrap(), sample());
}

#[cfg(feature = "json")]
#[test]
fn json_round_trip() {
    let registry = registry();
    let value = A {
        a: 1,
        b: B { b: "1".to_string() },
        c: vec![3, 4, 5],
        d: BTreeSet::from([1, 2]),
    };

    let tree = Value::Map(value.serialize(&registry).unwrap());
    let json = crate::text::to_json_string(&tree).unwrap();
    assert_eq!(json, r#"{"a":1,"b":{"b":"1"},"c":[3,4,5],"d":[1,2]}"#);

    let parsed = crate::text::from_json_str(&json).unwrap();
    let map = parsed.into_map().unwrap();
    assert_eq!(A::deserialize(map, &registry).unwrap(), value);
}
