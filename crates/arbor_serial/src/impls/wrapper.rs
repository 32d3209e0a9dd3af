use alloc::boxed::Box;

use arbor_value::Value;

use crate::attr::{Attr, AttrIterable, AttrMapping, Primitive};
use crate::error::ValueError;
use crate::object::{FromValue, Serializable};

// -----------------------------------------------------------------------------
// Option

/// `None` is a null primitive, `Some` is transparent.
impl<T: Attr> Attr for Option<T> {
    fn attr_type_name(&self) -> &'static str {
        match self {
            Some(v) => v.attr_type_name(),
            None => core::any::type_name::<Self>(),
        }
    }

    fn primitive(&self) -> Option<Primitive<'_>> {
        match self {
            Some(v) => v.primitive(),
            None => Some(Primitive::Null),
        }
    }

    fn as_serializable(&self) -> Option<&dyn Serializable> {
        self.as_ref().and_then(Attr::as_serializable)
    }

    fn as_set(&self) -> Option<&dyn AttrIterable> {
        self.as_ref().and_then(Attr::as_set)
    }

    fn as_iterable(&self) -> Option<&dyn AttrIterable> {
        self.as_ref().and_then(Attr::as_iterable)
    }

    fn as_mapping(&self) -> Option<&dyn AttrMapping> {
        self.as_ref().and_then(Attr::as_mapping)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    #[inline]
    fn missing() -> Option<Self> {
        Some(None)
    }
}

// -----------------------------------------------------------------------------
// Box

impl<T: Attr + ?Sized> Attr for Box<T> {
    #[inline]
    fn attr_type_name(&self) -> &'static str {
        (**self).attr_type_name()
    }

    #[inline]
    fn primitive(&self) -> Option<Primitive<'_>> {
        (**self).primitive()
    }

    #[inline]
    fn as_serializable(&self) -> Option<&dyn Serializable> {
        (**self).as_serializable()
    }

    #[inline]
    fn as_set(&self) -> Option<&dyn AttrIterable> {
        (**self).as_set()
    }

    #[inline]
    fn as_iterable(&self) -> Option<&dyn AttrIterable> {
        (**self).as_iterable()
    }

    #[inline]
    fn as_mapping(&self) -> Option<&dyn AttrMapping> {
        (**self).as_mapping()
    }
}

impl<T: FromValue> FromValue for Box<T> {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        T::from_value(value).map(Box::new)
    }

    #[inline]
    fn missing() -> Option<Self> {
        T::missing().map(Box::new)
    }
}
