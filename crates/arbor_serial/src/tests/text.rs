use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::registry::global;
use crate::text;
use crate::error::{SerialError, ValueError};
use crate::{Serializable, SerializableExt, Value, ValueMap};

#[derive(Serializable, Debug, PartialEq)]
#[serial(auto_register)]
struct Reading {
    sensor: String,
    samples: Vec<f64>,
    #[serial(skip_none)]
    unit: Option<String>,
}

#[test]
fn auto_registered_type_round_trips_through_json() {
    let reading = Reading {
        sensor: "t1".to_string(),
        samples: vec![0.5, 1.25],
        unit: None,
    };

    let json = reading.to_json().unwrap();
    assert_eq!(json, r#"{"sensor":"t1","samples":[0.5,1.25]}"#);
    assert!(global::registry().descriptor_of::<Reading>().is_some());

    let back = Reading::from_json(&json).unwrap();
    assert_eq!(back, reading);
}

#[test]
fn json_preserves_key_order() {
    let tree = text::from_json_str(r#"{"z":1,"a":[true,null],"m":{"k":"v"}}"#).unwrap();
    let keys: Vec<&str> = tree.as_map().unwrap().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
    assert_eq!(text::to_json_string(&tree).unwrap(), r#"{"z":1,"a":[true,null],"m":{"k":"v"}}"#);

    let pretty = text::to_json_pretty(&Value::from(vec![Value::from(1)])).unwrap();
    assert_eq!(pretty, "[\n  1\n]");
}

#[test]
fn malformed_json_is_a_text_error() {
    assert!(matches!(
        Reading::from_json("{"),
        Err(SerialError::Text(_))
    ));
}

#[test]
fn non_finite_numbers_are_rejected() {
    let mut map = ValueMap::new();
    map.insert("ok", 1.5);
    map.insert("xs", vec![Value::from(0.0), Value::from(f64::NAN)]);
    let tree = Value::Map(map);

    match text::to_json_string(&tree) {
        Err(SerialError::Value(ValueError::NonFinite { path })) => assert_eq!(path, "$.xs[1]"),
        other => panic!("expected a non-finite error, got {other:?}"),
    }
    assert!(text::to_json_pretty(&Value::from(f64::INFINITY)).is_err());
}
