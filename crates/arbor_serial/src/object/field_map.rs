use alloc::string::{String, ToString};
use alloc::vec::Vec;

use arbor_value::{Value, ValueMap};

use crate::error::ConstructionError;
use crate::object::FromValue;

// -----------------------------------------------------------------------------
// FieldMap

/// The converted fields of an object under construction.
///
/// A constructor takes each parameter out exactly once. [`finish`] then
/// checks that nothing was left behind.
///
/// [`finish`]: FieldMap::finish
#[derive(Debug)]
pub struct FieldMap {
    type_path: &'static str,
    values: ValueMap,
}

impl FieldMap {
    #[inline]
    pub fn new(type_path: &'static str, values: ValueMap) -> Self {
        Self { type_path, values }
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Removes the raw value of a field.
    #[inline]
    pub fn take_value(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Takes a required field.
    ///
    /// An absent field falls back to [`FromValue::missing`], so optional
    /// fields may be omitted from the map.
    pub fn take<T: FromValue>(&mut self, name: &'static str) -> Result<T, ConstructionError> {
        match self.values.remove(name) {
            Some(value) => T::from_value(value).map_err(|source| ConstructionError::InvalidField {
                type_path: self.type_path,
                field: name,
                source,
            }),
            None => T::missing().ok_or(ConstructionError::MissingKey {
                type_path: self.type_path,
                key: name,
            }),
        }
    }

    /// Takes a field, or `T::default()` when it is absent.
    pub fn take_or_default<T: FromValue + Default>(
        &mut self,
        name: &'static str,
    ) -> Result<T, ConstructionError> {
        self.take_or_else(name, T::default)
    }

    /// Takes a field, or `default` when it is absent.
    pub fn take_or<T: FromValue>(
        &mut self,
        name: &'static str,
        default: T,
    ) -> Result<T, ConstructionError> {
        self.take_or_else(name, || default)
    }

    /// Takes a field, or the result of `default` when it is absent.
    pub fn take_or_else<T: FromValue>(
        &mut self,
        name: &'static str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ConstructionError> {
        if self.values.contains_key(name) {
            self.take(name)
        } else {
            Ok(default())
        }
    }

    /// Keys that no constructor parameter has taken yet.
    #[inline]
    pub fn remaining_keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.values.keys()
    }

    /// Fails if any key was left untaken.
    pub fn finish(self) -> Result<(), ConstructionError> {
        if self.values.is_empty() {
            Ok(())
        } else {
            let keys: Vec<String> = self.values.keys().map(ToString::to_string).collect();
            Err(ConstructionError::UnknownKeys {
                type_path: self.type_path,
                keys,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FieldMap;
    use crate::error::ConstructionError;
    use arbor_value::{Value, ValueMap};

    fn fields() -> FieldMap {
        let values: ValueMap = [("n", Value::from(4)), ("s", Value::from("x"))]
            .into_iter()
            .collect();
        FieldMap::new("t::T", values)
    }

    #[test]
    fn take_and_finish() {
        let mut fields = fields();
        assert_eq!(fields.take::<u8>("n").unwrap(), 4);
        assert_eq!(fields.take_or_default::<u32>("absent").unwrap(), 0);
        assert!(fields.finish().is_err());
    }

    #[test]
    fn missing_required_field() {
        let mut fields = fields();
        let err = fields.take::<u8>("absent").unwrap_err();
        assert!(matches!(err, ConstructionError::MissingKey { key: "absent", .. }));

        let opt = fields.take::<Option<u8>>("absent").unwrap();
        assert_eq!(opt, None);
    }

    #[test]
    fn invalid_field_names_the_field() {
        let mut fields = fields();
        let err = fields.take::<u8>("s").unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidField { field: "s", .. }));
    }
}
