use alloc::boxed::Box;
use core::any::{TypeId, type_name};
use core::fmt;

use arbor_value::{Value, ValueKind};

use crate::attr::Attr;
use crate::convert::Converter;
use crate::error::{Direction, SerialError};

// -----------------------------------------------------------------------------
// Capability

/// The capabilities a raw value can advertise through [`Attr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// [`Attr::as_serializable`]
    Serializable,
    /// [`Attr::as_set`]
    SetLike,
    /// [`Attr::as_iterable`], excluding strings.
    Iterable,
    /// [`Attr::as_mapping`]
    Mapping,
    /// [`Attr::primitive`]
    Primitive,
}

impl Capability {
    pub fn matches(self, value: &dyn Attr) -> bool {
        match self {
            Self::Serializable => value.as_serializable().is_some(),
            Self::SetLike => value.as_set().is_some(),
            Self::Iterable => value.as_iterable().is_some() && !value.is_str(),
            Self::Mapping => value.as_mapping().is_some(),
            Self::Primitive => value.primitive().is_some(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Serializable => "serializable",
            Self::SetLike => "set",
            Self::Iterable => "iterable",
            Self::Mapping => "mapping",
            Self::Primitive => "primitive",
        }
    }
}

// -----------------------------------------------------------------------------
// RuleKey

/// The identity of a rule inside one rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    Capability(Capability),
    Kind(ValueKind),
    Type {
        id: TypeId,
        name: &'static str,
    },
    Named(&'static str),
}

impl RuleKey {
    #[inline]
    pub fn of_type<T: 'static>() -> Self {
        Self::Type {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capability(c) => write!(f, "capability `{}`", c.as_str()),
            Self::Kind(k) => write!(f, "kind `{k}`"),
            Self::Type { name, .. } => write!(f, "type `{name}`"),
            Self::Named(name) => write!(f, "rule `{name}`"),
        }
    }
}

// -----------------------------------------------------------------------------
// Function types

/// Converts a raw value, recursing through the converter for children.
pub type SerializeFn = dyn Fn(&dyn Attr, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync;

/// Converts a tree node on the way back, recursing through the converter for children.
pub type DeserializeFn = dyn Fn(Value, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync;

type SerializePredicate = dyn Fn(&dyn Attr) -> bool + Send + Sync;
type DeserializePredicate = dyn Fn(&Value) -> bool + Send + Sync;

#[inline]
fn boxed_serialize<F>(f: F) -> Box<SerializeFn>
where
    F: Fn(&dyn Attr, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync + 'static,
{
    Box::new(f)
}

#[inline]
fn boxed_deserialize<F>(f: F) -> Box<DeserializeFn>
where
    F: Fn(Value, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync + 'static,
{
    Box::new(f)
}

#[inline]
fn boxed_serialize_predicate<P>(p: P) -> Box<SerializePredicate>
where
    P: Fn(&dyn Attr) -> bool + Send + Sync + 'static,
{
    Box::new(p)
}

#[inline]
fn boxed_deserialize_predicate<P>(p: P) -> Box<DeserializePredicate>
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Box::new(p)
}

// -----------------------------------------------------------------------------
// SerializeRule

/// A serialize rule: a predicate over raw values and a conversion function.
///
/// # Examples
///
/// ```
/// use arbor_serial::registry::{Registry, SerializeRule};
/// use arbor_serial::Value;
///
/// struct Meters(f64);
/// impl arbor_serial::attr::Attr for Meters {}
///
/// let mut registry = Registry::new();
/// registry.register_serializer(SerializeRule::for_type(|m: &Meters, _| {
///     Ok(Value::from(format!("{}m", m.0)))
/// }));
///
/// let value = arbor_serial::convert::serialize(&Meters(2.5), &registry).unwrap();
/// assert_eq!(value, Value::from("2.5m"));
/// ```
pub struct SerializeRule {
    key: RuleKey,
    predicate: Box<SerializePredicate>,
    convert: Box<SerializeFn>,
}

impl SerializeRule {
    /// A rule that accepts every value advertising `capability`.
    pub fn capability<F>(capability: Capability, convert: F) -> Self
    where
        F: Fn(&dyn Attr, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync + 'static,
    {
        Self {
            key: RuleKey::Capability(capability),
            predicate: boxed_serialize_predicate(move |value| capability.matches(value)),
            convert: boxed_serialize(convert),
        }
    }

    /// A rule for one concrete type.
    pub fn for_type<T, F>(convert: F) -> Self
    where
        T: Attr,
        F: Fn(&T, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync + 'static,
    {
        Self {
            key: RuleKey::of_type::<T>(),
            predicate: boxed_serialize_predicate(|value| value.is::<T>()),
            convert: boxed_serialize(move |value, converter| match value.downcast_ref::<T>() {
                Some(concrete) => convert(concrete, converter),
                None => Err(converter.exhausted(Direction::Serialize, value.attr_type_name())),
            }),
        }
    }

    /// A rule with an arbitrary predicate, identified by `name`.
    pub fn predicate<P, F>(name: &'static str, predicate: P, convert: F) -> Self
    where
        P: Fn(&dyn Attr) -> bool + Send + Sync + 'static,
        F: Fn(&dyn Attr, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync + 'static,
    {
        Self {
            key: RuleKey::Named(name),
            predicate: boxed_serialize_predicate(predicate),
            convert: boxed_serialize(convert),
        }
    }

    #[inline]
    pub fn key(&self) -> &RuleKey {
        &self.key
    }

    #[inline]
    pub fn matches(&self, value: &dyn Attr) -> bool {
        (self.predicate)(value)
    }

    #[inline]
    pub fn apply(&self, value: &dyn Attr, converter: &Converter<'_>) -> Result<Value, SerialError> {
        (self.convert)(value, converter)
    }
}

impl fmt::Debug for SerializeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SerializeRule").field(&self.key).finish()
    }
}

// -----------------------------------------------------------------------------
// DeserializeRule

/// A deserialize rule: a predicate over tree nodes and a conversion function.
pub struct DeserializeRule {
    key: RuleKey,
    predicate: Box<DeserializePredicate>,
    convert: Box<DeserializeFn>,
}

impl DeserializeRule {
    /// A rule that accepts every node of `kind`.
    pub fn kind<F>(kind: ValueKind, convert: F) -> Self
    where
        F: Fn(Value, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync + 'static,
    {
        Self {
            key: RuleKey::Kind(kind),
            predicate: boxed_deserialize_predicate(move |value| value.kind() == kind),
            convert: boxed_deserialize(convert),
        }
    }

    /// A rule with an arbitrary predicate, identified by `name`.
    pub fn predicate<P, F>(name: &'static str, predicate: P, convert: F) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
        F: Fn(Value, &Converter<'_>) -> Result<Value, SerialError> + Send + Sync + 'static,
    {
        Self {
            key: RuleKey::Named(name),
            predicate: boxed_deserialize_predicate(predicate),
            convert: boxed_deserialize(convert),
        }
    }

    #[inline]
    pub fn key(&self) -> &RuleKey {
        &self.key
    }

    #[inline]
    pub fn matches(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    #[inline]
    pub fn apply(&self, value: Value, converter: &Converter<'_>) -> Result<Value, SerialError> {
        (self.convert)(value, converter)
    }
}

impl fmt::Debug for DeserializeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeserializeRule").field(&self.key).finish()
    }
}
