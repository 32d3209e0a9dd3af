use alloc::boxed::Box;
use alloc::collections::BTreeSet;

use arbor_value::Value;

use crate::attr::{Attr, AttrIter, AttrIterable};
use crate::error::ValueError;
use crate::object::FromValue;

fn expect_seq(value: Value) -> Result<alloc::vec::Vec<Value>, ValueError> {
    value.into_seq().map_err(|other| ValueError::Mismatch {
        expected: "sequence",
        found: other.kind(),
    })
}

// -----------------------------------------------------------------------------
// BTreeSet

impl<T: Attr> Attr for BTreeSet<T> {
    #[inline]
    fn as_set(&self) -> Option<&dyn AttrIterable> {
        Some(self)
    }

    #[inline]
    fn as_iterable(&self) -> Option<&dyn AttrIterable> {
        Some(self)
    }
}

impl<T: Attr> AttrIterable for BTreeSet<T> {
    #[inline]
    fn attr_len(&self) -> usize {
        self.len()
    }

    fn attr_iter(&self) -> AttrIter<'_> {
        Box::new(self.iter().map(|v| v as &dyn Attr))
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        expect_seq(value)?.into_iter().map(T::from_value).collect()
    }
}

// -----------------------------------------------------------------------------
// HashSet

#[cfg(feature = "std")]
mod hash_set {
    use alloc::boxed::Box;
    use core::hash::{BuildHasher, Hash};
    use std::collections::HashSet;

    use arbor_value::Value;

    use super::expect_seq;
    use crate::attr::{Attr, AttrIter, AttrIterable};
    use crate::error::ValueError;
    use crate::object::FromValue;

    impl<T: Attr, S: 'static> Attr for HashSet<T, S> {
        #[inline]
        fn as_set(&self) -> Option<&dyn AttrIterable> {
            Some(self)
        }

        #[inline]
        fn as_iterable(&self) -> Option<&dyn AttrIterable> {
            Some(self)
        }
    }

    impl<T: Attr, S> AttrIterable for HashSet<T, S> {
        #[inline]
        fn attr_len(&self) -> usize {
            self.len()
        }

        fn attr_iter(&self) -> AttrIter<'_> {
            Box::new(self.iter().map(|v| v as &dyn Attr))
        }
    }

    impl<T, S> FromValue for HashSet<T, S>
    where
        T: FromValue + Eq + Hash,
        S: BuildHasher + Default,
    {
        fn from_value(value: Value) -> Result<Self, ValueError> {
            expect_seq(value)?.into_iter().map(T::from_value).collect()
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;

    use crate::attr::Attr;

    #[test]
    fn sets_advertise_both_capabilities() {
        let s: BTreeSet<u8> = [2, 1].into_iter().collect();
        assert_eq!(s.as_set().map(|s| s.attr_len()), Some(2));
        assert!(s.as_iterable().is_some());
    }
}
