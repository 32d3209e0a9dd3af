use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use arbor_value::{Value, ValueMap};

use crate::attr::{Attr, AttrEntries, AttrMapping, MapKey};
use crate::error::ValueError;
use crate::object::FromValue;

fn expect_map(value: Value) -> Result<ValueMap, ValueError> {
    value.into_map().map_err(|other| ValueError::Mismatch {
        expected: "map",
        found: other.kind(),
    })
}

// -----------------------------------------------------------------------------
// MapKey

impl MapKey for String {
    #[inline]
    fn to_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    #[inline]
    fn from_key(key: &str) -> Result<Self, ValueError> {
        Ok(key.to_string())
    }
}

impl MapKey for Cow<'static, str> {
    #[inline]
    fn to_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    #[inline]
    fn from_key(key: &str) -> Result<Self, ValueError> {
        Ok(Cow::Owned(key.to_string()))
    }
}

macro_rules! impl_map_key_int {
    ($($ty:ty),*) => {$(
        impl MapKey for $ty {
            #[inline]
            fn to_key(&self) -> Cow<'_, str> {
                Cow::Owned(self.to_string())
            }

            fn from_key(key: &str) -> Result<Self, ValueError> {
                key.parse().map_err(|_| ValueError::Key {
                    key: key.to_string(),
                    expected: stringify!($ty),
                })
            }
        }
    )*};
}

impl_map_key_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// BTreeMap

impl<K: MapKey + 'static, V: Attr> Attr for BTreeMap<K, V> {
    #[inline]
    fn as_mapping(&self) -> Option<&dyn AttrMapping> {
        Some(self)
    }
}

impl<K: MapKey, V: Attr> AttrMapping for BTreeMap<K, V> {
    #[inline]
    fn attr_len(&self) -> usize {
        self.len()
    }

    fn attr_entries(&self) -> AttrEntries<'_> {
        Box::new(self.iter().map(|(k, v)| (k.to_key(), v as &dyn Attr)))
    }
}

impl<K: MapKey + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        expect_map(value)?
            .into_iter()
            .map(|(k, v)| -> Result<(K, V), ValueError> {
                Ok((K::from_key(&k)?, V::from_value(v)?))
            })
            .collect()
    }
}

// -----------------------------------------------------------------------------
// HashMap

#[cfg(feature = "std")]
mod hash_map {
    use alloc::boxed::Box;
    use core::hash::{BuildHasher, Hash};
    use std::collections::HashMap;

    use arbor_value::Value;

    use super::expect_map;
    use crate::attr::{Attr, AttrEntries, AttrMapping, MapKey};
    use crate::error::ValueError;
    use crate::object::FromValue;

    impl<K: MapKey + 'static, V: Attr, S: 'static> Attr for HashMap<K, V, S> {
        #[inline]
        fn as_mapping(&self) -> Option<&dyn AttrMapping> {
            Some(self)
        }
    }

    impl<K: MapKey, V: Attr, S> AttrMapping for HashMap<K, V, S> {
        #[inline]
        fn attr_len(&self) -> usize {
            self.len()
        }

        fn attr_entries(&self) -> AttrEntries<'_> {
            Box::new(self.iter().map(|(k, v)| (k.to_key(), v as &dyn Attr)))
        }
    }

    impl<K, V, S> FromValue for HashMap<K, V, S>
    where
        K: MapKey + Eq + Hash,
        V: FromValue,
        S: BuildHasher + Default,
    {
        fn from_value(value: Value) -> Result<Self, ValueError> {
            expect_map(value)?
                .into_iter()
                .map(|(k, v)| -> Result<(K, V), ValueError> {
                    Ok((K::from_key(&k)?, V::from_value(v)?))
                })
                .collect()
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;

    use arbor_value::{Value, ValueMap};

    use crate::attr::{Attr, MapKey};
    use crate::error::ValueError;
    use crate::object::FromValue;

    #[test]
    fn integer_keys_are_rendered_as_strings() {
        let m: BTreeMap<u32, bool> = [(10, true), (2, false)].into_iter().collect();
        let keys: Vec<String> = m
            .as_mapping()
            .unwrap()
            .attr_entries()
            .map(|(k, _)| k.into_owned())
            .collect();
        assert_eq!(keys, ["2", "10"]);
    }

    #[test]
    fn bad_integer_key() {
        assert!(matches!(
            u8::from_key("x"),
            Err(ValueError::Key { expected: "u8", .. })
        ));

        let mut map = ValueMap::new();
        map.insert("-1", 0);
        assert!(BTreeMap::<u8, u8>::from_value(Value::Map(map)).is_err());
    }
}
