//! The raw side of the engine: host values that can be converted into a
//! value tree.
//!
//! ## Menu
//!
//! - [`Attr`]: A dyn-compatible view of a host value. Each method advertises
//!   one capability; a value may advertise several, and the order of the
//!   rules in the [`Registry`] decides which one is used.
//! - [`Primitive`]: A borrowed leaf value.
//! - [`AttrIterable`]: Ordered or set-like containers.
//! - [`AttrMapping`]: String-keyed containers.
//! - [`MapKey`]: Map key types that can be rendered as and parsed from strings.
//!
//! Implementations for core, alloc and std types live in [`crate::impls`].
//!
//! [`Registry`]: crate::registry::Registry

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::any::{Any, TypeId};

use arbor_value::Value;

use crate::error::ValueError;
use crate::object::Serializable;

// -----------------------------------------------------------------------------
// Primitive

/// A leaf value borrowed from a host value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(&'a str),
}

impl Primitive<'_> {
    /// Copies the primitive into an owned tree node.
    pub fn to_value(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Int(i) => Value::from(i),
            Self::UInt(u) => Value::from(u),
            Self::Float(f) => Value::from(f),
            Self::Str(s) => Value::from(s),
        }
    }

    #[inline]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }
}

// -----------------------------------------------------------------------------
// Containers

/// Iterator over the elements of an [`AttrIterable`].
pub type AttrIter<'a> = Box<dyn Iterator<Item = &'a dyn Attr> + 'a>;

/// Iterator over the entries of an [`AttrMapping`].
pub type AttrEntries<'a> = Box<dyn Iterator<Item = (Cow<'a, str>, &'a dyn Attr)> + 'a>;

/// A container whose elements can be visited one by one.
pub trait AttrIterable {
    fn attr_len(&self) -> usize;

    fn attr_iter(&self) -> AttrIter<'_>;
}

/// A container of string-keyed entries.
///
/// Entries are visited in the container's own iteration order.
pub trait AttrMapping {
    fn attr_len(&self) -> usize;

    fn attr_entries(&self) -> AttrEntries<'_>;
}

/// A map key that is written to the tree as a string.
pub trait MapKey: Sized {
    fn to_key(&self) -> Cow<'_, str>;

    fn from_key(key: &str) -> Result<Self, ValueError>;
}

// -----------------------------------------------------------------------------
// Attr

/// A host value the engine can look into.
///
/// Every method has a default that advertises nothing, so an implementation
/// only overrides the capabilities it actually has. A type that overrides
/// none of them is opaque: no baseline rule accepts it.
///
/// # Examples
///
/// ```
/// use arbor_serial::attr::{Attr, Primitive};
///
/// struct Celsius(f64);
///
/// impl Attr for Celsius {
///     fn primitive(&self) -> Option<Primitive<'_>> {
///         Some(Primitive::Float(self.0))
///     }
/// }
///
/// let t: &dyn Attr = &Celsius(21.5);
/// assert_eq!(t.primitive(), Some(Primitive::Float(21.5)));
/// assert!(t.as_iterable().is_none());
/// assert!(t.is::<Celsius>());
/// ```
pub trait Attr: Any + 'static {
    /// Name used in error messages.
    fn attr_type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn primitive(&self) -> Option<Primitive<'_>> {
        None
    }

    /// The capability marker: the value converts itself through its own
    /// declared attributes.
    fn as_serializable(&self) -> Option<&dyn Serializable> {
        None
    }

    /// Set-like containers, whose iteration order is not meaningful.
    fn as_set(&self) -> Option<&dyn AttrIterable> {
        None
    }

    /// Ordered containers.
    fn as_iterable(&self) -> Option<&dyn AttrIterable> {
        None
    }

    fn as_mapping(&self) -> Option<&dyn AttrMapping> {
        None
    }
}

impl dyn Attr {
    /// The [`TypeId`] of the concrete value behind this reference.
    #[inline]
    pub fn attr_type_id(&self) -> TypeId {
        (self as &dyn Any).type_id()
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Returns `true` for string primitives.
    ///
    /// Strings are atomic: the iterable rules never expand them, even when
    /// a type advertises both capabilities.
    #[inline]
    pub fn is_str(&self) -> bool {
        self.primitive().is_some_and(|p| p.is_str())
    }
}
