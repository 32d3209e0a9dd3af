use alloc::borrow::Cow;
use alloc::boxed::Box;

use arbor_value::{Value, ValueMap};

use crate::attr::{Attr, AttrEntries, AttrIter, AttrIterable, AttrMapping, Primitive};
use crate::error::ValueError;
use crate::object::FromValue;

// -----------------------------------------------------------------------------
// Value

/// An already-built tree converts to itself.
impl Attr for Value {
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(match self {
            Value::Null => Primitive::Null,
            Value::Bool(b) => Primitive::Bool(*b),
            Value::Number(n) => match (n.as_u64(), n.as_i64()) {
                (Some(u), _) => Primitive::UInt(u),
                (None, Some(i)) => Primitive::Int(i),
                (None, None) => Primitive::Float(n.as_f64()),
            },
            Value::String(s) => Primitive::Str(s),
            Value::Seq(_) | Value::Map(_) => return None,
        })
    }

    fn as_iterable(&self) -> Option<&dyn AttrIterable> {
        match self {
            Value::Seq(_) => Some(self),
            _ => None,
        }
    }

    fn as_mapping(&self) -> Option<&dyn AttrMapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl AttrIterable for Value {
    fn attr_len(&self) -> usize {
        self.as_seq().map_or(0, <[Value]>::len)
    }

    fn attr_iter(&self) -> AttrIter<'_> {
        match self {
            Value::Seq(seq) => Box::new(seq.iter().map(|v| v as &dyn Attr)),
            _ => Box::new(core::iter::empty()),
        }
    }
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

// -----------------------------------------------------------------------------
// ValueMap

impl Attr for ValueMap {
    #[inline]
    fn as_mapping(&self) -> Option<&dyn AttrMapping> {
        Some(self)
    }
}

impl AttrMapping for ValueMap {
    #[inline]
    fn attr_len(&self) -> usize {
        self.len()
    }

    fn attr_entries(&self) -> AttrEntries<'_> {
        Box::new(
            self.iter()
                .map(|(k, v)| (Cow::Borrowed(k), v as &dyn Attr)),
        )
    }
}

impl FromValue for ValueMap {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        value.into_map().map_err(|other| ValueError::Mismatch {
            expected: "map",
            found: other.kind(),
        })
    }
}
