//! JSON text for value trees, through [`serde_json`].
//!
//! Text encoding is outside the engine proper: trees are plain data, and any
//! serde format can read or write them. JSON is provided because it is the
//! usual target.
//!
//! JSON has no spelling for NaN or the infinities, so trees holding them are
//! rejected with [`ValueError::NonFinite`] instead of being written as `null`.

use alloc::string::String;
use std::io;

use arbor_value::Value;

use crate::convert::trail::Trail;
use crate::error::{SerialError, ValueError};

/// Fails on the first NaN or infinite number, naming where it is.
fn ensure_finite(value: &Value) -> Result<(), ValueError> {
    fn find(value: &Value, trail: &Trail<'_>) -> Option<String> {
        match value {
            Value::Number(n) if !n.as_f64().is_finite() => Some(trail.render()),
            Value::Seq(items) => items
                .iter()
                .enumerate()
                .find_map(|(index, item)| find(item, &trail.index(index))),
            Value::Map(map) => map.iter().find_map(|(key, item)| find(item, &trail.key(key))),
            _ => None,
        }
    }

    match find(value, &Trail::ROOT) {
        Some(path) => Err(ValueError::NonFinite { path }),
        None => Ok(()),
    }
}

/// Compact JSON, keys in tree order.
///
/// NaN and infinite numbers are an error, [`ValueError::NonFinite`].
///
/// # Examples
///
/// ```
/// use arbor_serial::{Value, ValueMap, text};
///
/// let mut map = ValueMap::new();
/// map.insert("b", 1);
/// map.insert("a", Value::Null);
///
/// assert_eq!(text::to_json_string(&map.into()).unwrap(), r#"{"b":1,"a":null}"#);
/// ```
#[inline]
pub fn to_json_string(value: &Value) -> Result<String, SerialError> {
    ensure_finite(value)?;
    Ok(serde_json::to_string(value)?)
}

#[inline]
pub fn to_json_pretty(value: &Value) -> Result<String, SerialError> {
    ensure_finite(value)?;
    Ok(serde_json::to_string_pretty(value)?)
}

#[inline]
pub fn to_json_writer<W: io::Write>(writer: W, value: &Value) -> Result<(), SerialError> {
    ensure_finite(value)?;
    Ok(serde_json::to_writer(writer, value)?)
}

#[inline]
pub fn from_json_str(text: &str) -> Result<Value, SerialError> {
    Ok(serde_json::from_str(text)?)
}

#[inline]
pub fn from_json_reader<R: io::Read>(reader: R) -> Result<Value, SerialError> {
    Ok(serde_json::from_reader(reader)?)
}
