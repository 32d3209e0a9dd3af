use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use arbor_value::ValueMap;

use crate::error::{ConfigurationError, SerialError};
use crate::object::{AttributeSet, Declare, Serializable, reconstruct};
use crate::registry::Registry;

type ConstructFn = fn(ValueMap, &Registry) -> Result<Box<dyn Serializable>, SerialError>;

fn construct_boxed<T: Declare>(
    map: ValueMap,
    registry: &Registry,
) -> Result<Box<dyn Serializable>, SerialError> {
    let value = reconstruct::<T>(map, registry)?;
    Ok(Box::new(value))
}

// -----------------------------------------------------------------------------
// Descriptor

/// A validated declaration of a serializable type.
///
/// Created by [`Descriptor::of`], usually through
/// [`Registry::declare`](crate::registry::Registry::declare).
#[derive(Clone)]
pub struct Descriptor {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    attribute_set: AttributeSet,
    parameters: &'static [&'static str],
    construct: ConstructFn,
}

impl Descriptor {
    /// Builds the descriptor of `T`, rejecting a malformed attribute set.
    pub fn of<T: Declare>() -> Result<Self, ConfigurationError> {
        let attribute_set = T::attribute_set();
        attribute_set.validate(T::TYPE_PATH)?;
        Ok(Self {
            type_id: TypeId::of::<T>(),
            type_path: T::TYPE_PATH,
            type_name: short_name(T::TYPE_PATH),
            attribute_set,
            parameters: T::parameters(),
            construct: construct_boxed::<T>,
        })
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The last segment of the type path.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn attribute_set(&self) -> &AttributeSet {
        &self.attribute_set
    }

    #[inline]
    pub fn parameters(&self) -> &'static [&'static str] {
        self.parameters
    }

    /// Rebuilds an instance of the described type.
    #[inline]
    pub fn construct(
        &self,
        map: ValueMap,
        registry: &Registry,
    ) -> Result<Box<dyn Serializable>, SerialError> {
        (self.construct)(map, registry)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("type_path", &self.type_path)
            .field("attribute_set", &self.attribute_set)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

fn short_name(type_path: &'static str) -> &'static str {
    match type_path.rfind("::") {
        Some(index) => &type_path[index + 2..],
        None => type_path,
    }
}

#[cfg(test)]
mod tests {
    use super::short_name;

    #[test]
    fn short_names() {
        assert_eq!(short_name("a::b::Cat"), "Cat");
        assert_eq!(short_name("Cat"), "Cat");
    }
}
