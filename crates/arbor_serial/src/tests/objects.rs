use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::attr::Attr;
use crate::error::{ConfigurationError, ConstructionError, SerialError, ValueError};
use crate::object::{
    AttributeSet, Declare, FieldMap, FromValue, deserialize_tagged, from_nested, project,
    serialize_tagged,
};
use crate::registry::Registry;
use crate::{Serializable, Value, ValueMap};

#[derive(Serializable, Debug, PartialEq)]
#[serial(attrs(c, a))]
struct Ordered {
    a: i32,
    #[serial(default)]
    b: i32,
    c: i32,
}

#[derive(Serializable, Debug, PartialEq)]
struct Plain {
    z: u8,
    y: u8,
}

#[derive(Serializable, Debug, PartialEq)]
struct Note {
    text: String,
    #[serial(skip_none)]
    tag: Option<String>,
    extra: Option<u8>,
}

fn keys(map: &ValueMap) -> Vec<&str> {
    map.keys().collect()
}

#[test]
fn declared_order_wins_over_field_order() {
    let mut registry = Registry::new();
    registry.declare::<Ordered>().unwrap();

    let value = Ordered { a: 1, b: 2, c: 3 };
    let map = value.serialize(&registry).unwrap();
    assert_eq!(keys(&map), ["c", "a"]);

    let back = Ordered::deserialize(map, &registry).unwrap();
    assert_eq!(back, Ordered { a: 1, b: 0, c: 3 });
}

#[test]
fn all_attributes_follow_declaration_order() {
    let mut registry = Registry::new();
    registry.declare::<Plain>().unwrap();

    let map = Plain { z: 1, y: 2 }.serialize(&registry).unwrap();
    assert_eq!(keys(&map), ["z", "y"]);
    assert_eq!(
        registry.descriptor_of::<Plain>().map(|d| d.attribute_set()),
        Some(&AttributeSet::All)
    );
}

#[test]
fn unbound_attributes_are_omitted() {
    let mut registry = Registry::new();
    registry.declare::<Note>().unwrap();

    let note = Note {
        text: "hi".to_string(),
        tag: None,
        extra: None,
    };
    let map = note.serialize(&registry).unwrap();
    assert_eq!(keys(&map), ["text", "extra"]);
    assert_eq!(map.get("extra"), Some(&Value::Null));

    let names: Vec<&str> = project(&note, &AttributeSet::All).names().collect();
    assert_eq!(names, ["text", "extra"]);

    let mut only_text = ValueMap::new();
    only_text.insert("text", "hi");
    assert_eq!(Note::deserialize(only_text, &registry).unwrap(), note);
}

#[test]
fn undeclared_type_uses_its_own_attributes() {
    let registry = Registry::new();
    let map = Ordered { a: 1, b: 2, c: 3 }.serialize(&registry).unwrap();
    assert_eq!(keys(&map), ["c", "a"]);
    assert!(registry.descriptor_of::<Ordered>().is_none());
}

#[test]
fn missing_and_invalid_fields() {
    let registry = Registry::new();

    let mut map = ValueMap::new();
    map.insert("z", 1);
    match Plain::deserialize(map, &registry) {
        Err(SerialError::Construction(ConstructionError::MissingKey { key, .. })) => {
            assert_eq!(key, "y");
        }
        other => panic!("expected a missing key, got {other:?}"),
    }

    let mut map = ValueMap::new();
    map.insert("z", 1);
    map.insert("y", "two");
    match Plain::deserialize(map, &registry) {
        Err(SerialError::Construction(ConstructionError::InvalidField { field, source, .. })) => {
            assert_eq!(field, "y");
            assert!(matches!(source, ValueError::Mismatch { .. }));
        }
        other => panic!("expected an invalid field, got {other:?}"),
    }
}

#[test]
fn nested_value_must_be_a_map() {
    let err = from_nested::<Plain>(Value::from(3)).unwrap_err();
    let ValueError::Nested(inner) = err else {
        panic!("expected a nested error");
    };
    assert!(matches!(
        *inner,
        SerialError::Construction(ConstructionError::NotAMap { .. })
    ));
}

// -----------------------------------------------------------------------------
// Hand-written declarations

static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

/// Counts its constructions.
struct Counted {
    n: u8,
}

impl Attr for Counted {
    fn as_serializable(&self) -> Option<&dyn Serializable> {
        Some(self)
    }
}

impl Serializable for Counted {
    fn type_path(&self) -> &'static str {
        Self::TYPE_PATH
    }

    fn attrs(&self) -> AttributeSet {
        Self::attribute_set()
    }

    fn bound_attrs(&self) -> Vec<(&'static str, &dyn Attr)> {
        vec![("n", &self.n as &dyn Attr)]
    }
}

impl Declare for Counted {
    const TYPE_PATH: &'static str = "tests::Counted";

    fn attribute_set() -> AttributeSet {
        AttributeSet::All
    }

    fn parameters() -> &'static [&'static str] {
        &["n"]
    }

    fn construct(fields: &mut FieldMap) -> Result<Self, ConstructionError> {
        CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
        Ok(Self { n: fields.take("n")? })
    }
}

impl FromValue for Counted {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        from_nested(value)
    }
}

/// Lists the same attribute twice.
struct Doubled {
    a: u8,
}

impl Attr for Doubled {
    fn as_serializable(&self) -> Option<&dyn Serializable> {
        Some(self)
    }
}

impl Serializable for Doubled {
    fn type_path(&self) -> &'static str {
        Self::TYPE_PATH
    }

    fn attrs(&self) -> AttributeSet {
        Self::attribute_set()
    }

    fn bound_attrs(&self) -> Vec<(&'static str, &dyn Attr)> {
        vec![("a", &self.a as &dyn Attr)]
    }
}

impl Declare for Doubled {
    const TYPE_PATH: &'static str = "tests::Doubled";

    fn attribute_set() -> AttributeSet {
        AttributeSet::only(&["a", "a"])
    }

    fn parameters() -> &'static [&'static str] {
        &["a"]
    }

    fn construct(fields: &mut FieldMap) -> Result<Self, ConstructionError> {
        Ok(Self { a: fields.take("a")? })
    }
}

impl FromValue for Doubled {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        from_nested(value)
    }
}

#[test]
fn unknown_keys_are_rejected_before_construction() {
    let mut registry = Registry::new();
    registry.declare::<Counted>().unwrap();

    let mut map = ValueMap::new();
    map.insert("n", 1);
    map.insert("bogus", true);

    let before = CONSTRUCTED.load(Ordering::SeqCst);
    match Counted::deserialize(map, &registry) {
        Err(SerialError::Construction(ConstructionError::UnknownKeys { keys, .. })) => {
            assert_eq!(keys, ["bogus"]);
        }
        Err(other) => panic!("expected unknown keys, got {other:?}"),
        Ok(_) => panic!("expected unknown keys"),
    }
    assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), before);
}

#[test]
fn duplicate_attribute_fails_at_declaration() {
    let mut registry = Registry::new();
    assert_eq!(
        registry.declare::<Doubled>(),
        Err(ConfigurationError::DuplicateAttribute {
            type_path: "tests::Doubled",
            name: "a",
        })
    );
    assert!(registry.descriptor_of::<Doubled>().is_none());

    let err = Doubled { a: 1 }.serialize(&registry).unwrap_err();
    assert!(matches!(
        err,
        SerialError::Configuration(ConfigurationError::DuplicateAttribute { name: "a", .. })
    ));
}

// -----------------------------------------------------------------------------
// Type lookup

mod left {
    use crate::Serializable;

    #[derive(Serializable)]
    pub(super) struct Same {}
}

mod right {
    use crate::Serializable;

    #[derive(Serializable)]
    pub(super) struct Same {}
}

#[derive(Serializable)]
#[serial(type_path = "tests::Counted")]
struct Impostor {}

#[test]
fn short_names_can_be_ambiguous() {
    let mut registry = Registry::new();
    registry.declare::<left::Same>().unwrap();
    assert!(registry.get_with_type_name("Same").is_some());

    registry.declare::<right::Same>().unwrap();
    assert!(registry.is_ambiguous("Same"));
    assert!(registry.get_with_type_name("Same").is_none());
    assert!(registry.get_with_type_path(<right::Same as Declare>::TYPE_PATH).is_some());
    assert_eq!(registry.iter_descriptors().len(), 2);
}

#[test]
fn type_path_conflict() {
    let mut registry = Registry::new();
    registry.declare::<Counted>().unwrap();
    assert_eq!(
        registry.declare::<Impostor>(),
        Err(ConfigurationError::Conflict {
            type_path: "tests::Counted"
        })
    );
}

#[test]
fn tagged_form_round_trips() {
    let mut registry = Registry::new();
    registry.declare::<Plain>().unwrap();

    let tagged = serialize_tagged(&Plain { z: 4, y: 5 }, &registry).unwrap();
    let outer = tagged.as_map().unwrap();
    assert_eq!(outer.len(), 1);
    assert_eq!(keys(outer), [<Plain as Declare>::TYPE_PATH]);

    let object = deserialize_tagged(tagged, &registry).unwrap();
    let inner = object.serialize(&registry).unwrap();
    assert_eq!(keys(&inner), ["z", "y"]);
    let plain = object.downcast::<Plain>().ok().unwrap();
    assert_eq!(*plain, Plain { z: 4, y: 5 });

    let mut unknown = ValueMap::new();
    unknown.insert("nowhere::Plain", ValueMap::new());
    assert!(matches!(
        deserialize_tagged(unknown.into(), &registry),
        Err(SerialError::Configuration(ConfigurationError::UnknownTypePath { .. }))
    ));
}
