use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use arbor_value::ValueMap;

use crate::attr::Attr;
use crate::convert::Converter;
use crate::error::{ConfigurationError, ConstructionError, SerialError};
use crate::object::{AttributeSet, Descriptor, FieldMap, FromValue, reconstruct};
use crate::registry::Registry;

// -----------------------------------------------------------------------------
// Serializable

/// The capability marker.
///
/// A serializable value converts to a map of its declared attributes rather
/// than through the generic container rules. The trait is dyn-compatible;
/// the static half lives in [`Declare`].
///
/// Implement it with `#[derive(Serializable)]`.
pub trait Serializable: Attr + 'static {
    /// The full path of the type, unique within a registry.
    fn type_path(&self) -> &'static str;

    /// The attributes the type declares for serialization.
    ///
    /// Used when the type has no descriptor in the registry; a declared
    /// descriptor takes precedence.
    fn attrs(&self) -> AttributeSet;

    /// Every attribute currently bound on this instance, in declaration order.
    ///
    /// An attribute may be unbound, for example an `Option` field marked
    /// `#[serial(skip_none)]` that holds `None`.
    fn bound_attrs(&self) -> Vec<(&'static str, &dyn Attr)>;

    /// Projects the declared attributes and converts each of them.
    #[inline]
    fn serialize(&self, registry: &Registry) -> Result<ValueMap, SerialError> {
        Converter::new(registry).serialize_object(self)
    }
}

impl dyn Serializable {
    #[inline]
    pub fn is<T: Serializable>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Serializable>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Recovers the concrete type, or gives the box back.
    pub fn downcast<T: Serializable>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        Ok(any
            .downcast::<T>()
            .unwrap_or_else(|_| unreachable!("type checked above")))
    }
}

// -----------------------------------------------------------------------------
// Declare

/// The static half of a serializable type.
///
/// # Examples
///
/// A hand-written implementation, equivalent to what the derive generates:
///
/// ```
/// use arbor_serial::attr::Attr;
/// use arbor_serial::error::{ConstructionError, ValueError};
/// use arbor_serial::object::{AttributeSet, Declare, FieldMap, FromValue, Serializable, from_nested};
/// use arbor_serial::registry::Registry;
/// use arbor_serial::Value;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Attr for Point {
///     fn as_serializable(&self) -> Option<&dyn Serializable> {
///         Some(self)
///     }
/// }
///
/// impl Serializable for Point {
///     fn type_path(&self) -> &'static str {
///         Self::TYPE_PATH
///     }
///
///     fn attrs(&self) -> AttributeSet {
///         Self::attribute_set()
///     }
///
///     fn bound_attrs(&self) -> Vec<(&'static str, &dyn Attr)> {
///         vec![("x", &self.x as &dyn Attr), ("y", &self.y as &dyn Attr)]
///     }
/// }
///
/// impl Declare for Point {
///     const TYPE_PATH: &'static str = "geo::Point";
///
///     fn attribute_set() -> AttributeSet {
///         AttributeSet::only(&["y", "x"])
///     }
///
///     fn parameters() -> &'static [&'static str] {
///         &["x", "y"]
///     }
///
///     fn construct(fields: &mut FieldMap) -> Result<Self, ConstructionError> {
///         Ok(Self { x: fields.take("x")?, y: fields.take("y")? })
///     }
/// }
///
/// impl FromValue for Point {
///     fn from_value(value: Value) -> Result<Self, ValueError> {
///         from_nested(value)
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.declare::<Point>().unwrap();
///
/// let map = Point { x: 1, y: 2 }.serialize(&registry).unwrap();
/// let keys: Vec<&str> = map.keys().collect();
/// assert_eq!(keys, ["y", "x"]);
///
/// let back = Point::deserialize(map, &registry).unwrap();
/// assert_eq!((back.x, back.y), (1, 2));
/// ```
pub trait Declare: Serializable + FromValue + Sized {
    const TYPE_PATH: &'static str;

    /// The attributes written by serialization.
    fn attribute_set() -> AttributeSet;

    /// The keys accepted by [`construct`](Self::construct).
    fn parameters() -> &'static [&'static str];

    /// Builds a value from already converted fields.
    ///
    /// Keys outside [`parameters`](Self::parameters) are rejected before
    /// this is called.
    fn construct(fields: &mut FieldMap) -> Result<Self, ConstructionError>;

    /// Validates the declaration.
    #[inline]
    fn descriptor() -> Result<Descriptor, ConfigurationError> {
        Descriptor::of::<Self>()
    }

    /// Rebuilds a value from a map produced by [`Serializable::serialize`].
    #[inline]
    fn deserialize(map: ValueMap, registry: &Registry) -> Result<Self, SerialError> {
        reconstruct::<Self>(map, registry)
    }
}
