use alloc::borrow::Cow;
use alloc::string::String;

use arbor_value::Value;

use crate::attr::{Attr, Primitive};
use crate::error::ValueError;
use crate::object::FromValue;

// -----------------------------------------------------------------------------
// Attr

impl Attr for () {
    #[inline]
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Null)
    }
}

impl Attr for bool {
    #[inline]
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Bool(*self))
    }
}

macro_rules! impl_attr_number {
    ($variant:ident as $repr:ty: $($ty:ty),*) => {$(
        impl Attr for $ty {
            #[inline]
            fn primitive(&self) -> Option<Primitive<'_>> {
                Some(Primitive::$variant(*self as $repr))
            }
        }
    )*};
}

impl_attr_number!(Int as i64: i8, i16, i32, i64, isize);
impl_attr_number!(UInt as u64: u8, u16, u32, u64, usize);
impl_attr_number!(Float as f64: f32, f64);

impl Attr for String {
    #[inline]
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Str(self))
    }
}

impl Attr for &'static str {
    #[inline]
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Str(self))
    }
}

impl Attr for Cow<'static, str> {
    #[inline]
    fn primitive(&self) -> Option<Primitive<'_>> {
        Some(Primitive::Str(self))
    }
}

// -----------------------------------------------------------------------------
// FromValue

#[inline]
fn mismatch(expected: &'static str, found: &Value) -> ValueError {
    ValueError::Mismatch {
        expected,
        found: found.kind(),
    }
}

impl FromValue for () {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(()),
            other => Err(mismatch("null", &other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        value.as_bool().ok_or_else(|| mismatch("bool", &value))
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ValueError> {
                let Some(&n) = value.as_number() else {
                    return Err(mismatch(stringify!($ty), &value));
                };
                let converted = match n.as_i64() {
                    Some(i) => <$ty>::try_from(i).ok(),
                    None => n.as_u64().and_then(|u| <$ty>::try_from(u).ok()),
                };
                converted.ok_or(ValueError::OutOfRange {
                    expected: stringify!($ty),
                    value: n,
                })
            }
        }
    )*};
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Number(n) => Ok(n.as_f64() as f32),
            other => Err(mismatch("f32", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl FromValue for Cow<'static, str> {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        String::from_value(value).map(Cow::Owned)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use arbor_value::{Value, ValueKind};

    use crate::attr::{Attr, Primitive};
    use crate::error::ValueError;
    use crate::object::FromValue;

    #[test]
    fn numbers_report_their_sign_class() {
        assert_eq!((-4_i8).primitive(), Some(Primitive::Int(-4)));
        assert_eq!(4_u16.primitive(), Some(Primitive::UInt(4)));
        assert_eq!(0.5_f32.primitive(), Some(Primitive::Float(0.5)));
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(u8::from_value(Value::from(255)).ok(), Some(255));
        assert!(matches!(
            u8::from_value(Value::from(256)),
            Err(ValueError::OutOfRange { expected: "u8", .. })
        ));
        assert!(matches!(
            u32::from_value(Value::from(-1)),
            Err(ValueError::OutOfRange { .. })
        ));
        assert_eq!(i64::from_value(Value::from(-1)).ok(), Some(-1));
    }

    #[test]
    fn floats_are_not_integers() {
        assert!(matches!(
            i32::from_value(Value::from(1.5)),
            Err(ValueError::OutOfRange { .. })
        ));
        assert_eq!(f64::from_value(Value::from(3)).ok(), Some(3.0));
    }

    #[test]
    fn strings_stay_strings() {
        assert!(matches!(
            String::from_value(Value::from(1)),
            Err(ValueError::Mismatch {
                expected: "string",
                found: ValueKind::Number
            })
        ));
        let s: &dyn Attr = &String::from("abc");
        assert!(s.is_str());
        assert!(s.as_iterable().is_none());
    }
}
