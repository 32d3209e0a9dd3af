use arbor_value::Value;

use crate::error::ValueError;

/// Reads a Rust value out of a tree node.
///
/// This is a pure shape conversion: it does not consult any registry rule.
/// [`reconstruct`](crate::object::reconstruct) runs the deserialize rules
/// first, then hands each field to its `FromValue` implementation.
///
/// # Examples
///
/// ```
/// use arbor_serial::Value;
/// use arbor_serial::object::FromValue;
///
/// assert_eq!(u8::from_value(Value::from(7)).unwrap(), 7);
/// assert!(u8::from_value(Value::from(300)).is_err());
/// assert_eq!(Option::<u8>::missing(), Some(None));
/// ```
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ValueError>;

    /// The value used when a constructor parameter is absent from the map.
    ///
    /// `None` means the parameter is required.
    #[inline]
    fn missing() -> Option<Self> {
        None
    }
}
