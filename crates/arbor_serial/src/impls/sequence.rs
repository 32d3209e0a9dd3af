use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use arbor_value::Value;

use crate::attr::{Attr, AttrIter, AttrIterable};
use crate::error::ValueError;
use crate::object::FromValue;

// -----------------------------------------------------------------------------
// Helpers

fn expect_seq(value: Value) -> Result<Vec<Value>, ValueError> {
    value.into_seq().map_err(|other| ValueError::Mismatch {
        expected: "sequence",
        found: other.kind(),
    })
}

macro_rules! impl_attr_iterable {
    ($ty:ty, [$($generics:tt)*]) => {
        impl<$($generics)*> Attr for $ty {
            #[inline]
            fn as_iterable(&self) -> Option<&dyn AttrIterable> {
                Some(self)
            }
        }

        impl<$($generics)*> AttrIterable for $ty {
            #[inline]
            fn attr_len(&self) -> usize {
                self.len()
            }

            fn attr_iter(&self) -> AttrIter<'_> {
                Box::new(self.iter().map(|v| v as &dyn Attr))
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Vec, VecDeque, array

impl_attr_iterable!(Vec<T>, [T: Attr]);
impl_attr_iterable!(VecDeque<T>, [T: Attr]);
impl_attr_iterable!([T; N], [T: Attr, const N: usize]);

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        expect_seq(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        expect_seq(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        let items = expect_seq(value)?;
        let found = items.len();
        let items: Vec<T> = items
            .into_iter()
            .map(T::from_value)
            .collect::<Result<_, _>>()?;
        items
            .try_into()
            .map_err(|_| ValueError::Length { expected: N, found })
    }
}

// -----------------------------------------------------------------------------
// Tuples

macro_rules! impl_tuple {
    ($len:literal: $($name:ident $idx:tt),+) => {
        impl<$($name: Attr),+> Attr for ($($name,)+) {
            #[inline]
            fn as_iterable(&self) -> Option<&dyn AttrIterable> {
                Some(self)
            }
        }

        impl<$($name: Attr),+> AttrIterable for ($($name,)+) {
            #[inline]
            fn attr_len(&self) -> usize {
                $len
            }

            fn attr_iter(&self) -> AttrIter<'_> {
                Box::new([$(&self.$idx as &dyn Attr),+].into_iter())
            }
        }

        impl<$($name: FromValue),+> FromValue for ($($name,)+) {
            fn from_value(value: Value) -> Result<Self, ValueError> {
                let items = expect_seq(value)?;
                if items.len() != $len {
                    return Err(ValueError::Length {
                        expected: $len,
                        found: items.len(),
                    });
                }
                let mut items = items.into_iter();
                Ok(($(
                    $name::from_value(items.next().unwrap_or_default())?,
                )+))
            }
        }
    };
}

impl_tuple!(1: A 0);
impl_tuple!(2: A 0, B 1);
impl_tuple!(3: A 0, B 1, C 2);
impl_tuple!(4: A 0, B 1, C 2, D 3);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use arbor_value::Value;

    use crate::attr::{Attr, Primitive};
    use crate::error::ValueError;
    use crate::object::FromValue;

    #[test]
    fn vec_iterates_in_order() {
        let v = vec![3_i32, 4, 5];
        let items: Vec<_> = v
            .as_iterable()
            .unwrap()
            .attr_iter()
            .map(|a| a.primitive())
            .collect();
        assert_eq!(
            items,
            [
                Some(Primitive::Int(3)),
                Some(Primitive::Int(4)),
                Some(Primitive::Int(5))
            ]
        );
    }

    #[test]
    fn tuples_are_heterogeneous() {
        let t = (1_u8, "x", true);
        let it = t.as_iterable().unwrap();
        assert_eq!(it.attr_len(), 3);
        let last = it.attr_iter().last().and_then(|a| a.primitive());
        assert_eq!(last, Some(Primitive::Bool(true)));
    }

    #[test]
    fn fixed_length_targets_check_length() {
        let seq = Value::from(vec![Value::from(1), Value::from(2)]);
        assert_eq!(<[u8; 2]>::from_value(seq.clone()).ok(), Some([1, 2]));
        assert!(matches!(
            <[u8; 3]>::from_value(seq.clone()),
            Err(ValueError::Length {
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            <(u8, u8, u8)>::from_value(seq),
            Err(ValueError::Length { .. })
        ));
    }
}
