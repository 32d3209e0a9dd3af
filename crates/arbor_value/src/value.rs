use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{Number, ValueKind, ValueMap};

// -----------------------------------------------------------------------------
// Value

/// A node of the value tree.
///
/// # Examples
///
/// ```
/// use arbor_value::{Value, ValueKind};
///
/// let v = Value::from(vec![Value::from(1), Value::from("two")]);
/// assert_eq!(v.kind(), ValueKind::Seq);
/// assert_eq!(v.as_seq().map(|s| s.len()), Some(2));
///
/// assert!(Value::from(None::<i32>).is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Seq(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Seq(_) => ValueKind::Seq,
            Self::Map(_) => ValueKind::Map,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Consumes the value, returning the sequence or giving the value back.
    #[inline]
    pub fn into_seq(self) -> Result<Vec<Value>, Self> {
        match self {
            Self::Seq(s) => Ok(s),
            other => Err(other),
        }
    }

    /// Consumes the value, returning the map or giving the value back.
    #[inline]
    pub fn into_map(self) -> Result<ValueMap, Self> {
        match self {
            Self::Map(m) => Ok(m),
            other => Err(other),
        }
    }

    /// Takes the value out, leaving [`Value::Null`] in its place.
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_number {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(n: $ty) -> Self {
                Self::Number(Number::from(n))
            }
        }
    )*};
}

impl_from_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Number> for Value {
    #[inline]
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::String(String::from(s))
    }
}

impl From<Cow<'_, str>> for Value {
    #[inline]
    fn from(s: Cow<'_, str>) -> Self {
        Self::String(s.into_owned())
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(s: Vec<Value>) -> Self {
        Self::Seq(s)
    }
}

impl From<ValueMap> for Value {
    #[inline]
    fn from(m: ValueMap) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(o: Option<T>) -> Self {
        match o {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Seq(iter.into_iter().collect())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::{ValueKind, ValueMap};
    use alloc::vec;

    #[test]
    fn kinds() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Number);
        assert_eq!(Value::from("s").kind(), ValueKind::String);
        assert_eq!(Value::from(vec![]).kind(), ValueKind::Seq);
        assert_eq!(Value::from(ValueMap::new()).kind(), ValueKind::Map);
    }

    #[test]
    fn into_map_gives_back_other_kinds() {
        let v = Value::from(3);
        assert_eq!(v.clone().into_map(), Err(v));
    }

    #[test]
    fn take_leaves_null() {
        let mut v = Value::from("x");
        assert_eq!(v.take(), Value::from("x"));
        assert!(v.is_null());
    }
}
