use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{Error, MapAccess, SeqAccess, Visitor};
use serde_core::{Deserialize, Deserializer};

use crate::{Number, Value, ValueMap};

// -----------------------------------------------------------------------------
// Value

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any value tree node")
    }

    #[inline]
    fn visit_bool<E: Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    #[inline]
    fn visit_i64<E: Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    #[inline]
    fn visit_u64<E: Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    #[inline]
    fn visit_f64<E: Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    #[inline]
    fn visit_str<E: Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    #[inline]
    fn visit_string<E: Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    #[inline]
    fn visit_unit<E: Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    #[inline]
    fn visit_none<E: Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    #[inline]
    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            out.push(item);
        }
        Ok(Value::Seq(out))
    }

    #[inline]
    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        ValueMapVisitor.visit_map(map).map(Value::Map)
    }
}

impl<'de> Deserialize<'de> for Value {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// -----------------------------------------------------------------------------
// ValueMap

struct ValueMapVisitor;

impl<'de> Visitor<'de> for ValueMapVisitor {
    type Value = ValueMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string-keyed map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ValueMap, A::Error> {
        let mut out = ValueMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            out.insert(key, value);
        }
        Ok(out)
    }
}

impl<'de> Deserialize<'de> for ValueMap {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ValueMapVisitor)
    }
}

// -----------------------------------------------------------------------------
// Number

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Number;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number")
    }

    #[inline]
    fn visit_i64<E: Error>(self, v: i64) -> Result<Number, E> {
        Ok(Number::from(v))
    }

    #[inline]
    fn visit_u64<E: Error>(self, v: u64) -> Result<Number, E> {
        Ok(Number::from(v))
    }

    #[inline]
    fn visit_f64<E: Error>(self, v: f64) -> Result<Number, E> {
        Ok(Number::from(v))
    }
}

impl<'de> Deserialize<'de> for Number {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumberVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::{Value, ValueMap};
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn json_round_trip_keeps_key_order() {
        let text = r#"{"z":1,"a":[true,null,"s"],"m":{"k":-3,"f":2.5}}"#;
        let value: Value = serde_json::from_str(text).unwrap();

        let map = value.as_map().unwrap();
        let keys: vec::Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);

        let back = serde_json::to_string(&value).unwrap();
        assert_eq!(back, text);
    }

    #[test]
    fn json_numbers() {
        let value: Value = serde_json::from_str("[1, -1, 1.0, 18446744073709551615]").unwrap();
        let seq = value.as_seq().unwrap();
        assert_eq!(seq[0].as_number().and_then(|n| n.as_u64()), Some(1));
        assert_eq!(seq[1].as_number().and_then(|n| n.as_i64()), Some(-1));
        assert!(seq[2].as_number().unwrap().is_f64());
        assert_eq!(seq[3].as_number().and_then(|n| n.as_u64()), Some(u64::MAX));
    }

    #[test]
    fn ron_encoding() {
        let mut map = ValueMap::new();
        map.insert("a", 1);
        map.insert("b", vec![Value::from(true)]);

        let text: String = ron::to_string(&Value::Map(map.clone())).unwrap();
        assert_eq!(text, r#"{"a":1,"b":[true]}"#);

        let back: Value = ron::from_str(&text).unwrap();
        assert_eq!(back, Value::Map(map));
    }
}
