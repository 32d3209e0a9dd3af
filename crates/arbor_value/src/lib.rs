//! The format-agnostic value tree produced and consumed by `arbor_serial`.
//!
//! A [`Value`] only ever holds primitives, ordered sequences and
//! string-keyed, insertion-ordered mappings ([`ValueMap`]). It has no
//! variant for arbitrary host objects, so a fully serialized tree can be
//! handed to any self-describing `serde` format as-is.
//!
//! ## Menu
//!
//! - [`Value`]: The tree node.
//! - [`Number`]: An integer or float, stored without loss.
//! - [`ValueMap`]: An insertion-ordered `String -> Value` map.
//! - [`ValueKind`]: The shape of a node, used in error messages.
//!
//! # Example
//!
//! ```
//! use arbor_value::{Value, ValueMap};
//!
//! let mut map = ValueMap::new();
//! map.insert("a", 1);
//! map.insert("b", vec![Value::from("x"), Value::Null]);
//!
//! let text = serde_json::to_string(&Value::Map(map)).unwrap();
//! assert_eq!(text, r#"{"a":1,"b":["x",null]}"#);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod map;
mod number;
mod serde;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use kind::ValueKind;
pub use map::{IntoIter, Iter, ValueMap};
pub use number::Number;
pub use value::Value;
