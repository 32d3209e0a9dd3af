use core::fmt;

// -----------------------------------------------------------------------------
// Number

/// A numeric leaf of the value tree.
///
/// Non-negative integers are stored as `u64`, negative integers as `i64`
/// and everything else as `f64`, so any integer that fits in either type
/// survives a round trip exactly.
///
/// Integers and floats never compare equal to each other, even when they
/// denote the same quantity.
///
/// # Examples
///
/// ```
/// use arbor_value::Number;
///
/// assert_eq!(Number::from(3_u8), Number::from(3_i64));
/// assert_eq!(Number::from(-2).as_i64(), Some(-2));
/// assert_eq!(Number::from(-2).as_u64(), None);
/// assert_ne!(Number::from(1), Number::from(1.0));
/// ```
#[derive(Clone, Copy)]
pub struct Number {
    n: N,
}

#[derive(Clone, Copy)]
enum N {
    PosInt(u64),
    /// Always less than zero.
    NegInt(i64),
    Float(f64),
}

impl Number {
    /// Creates a float number.
    #[inline]
    pub const fn from_f64(f: f64) -> Self {
        Self { n: N::Float(f) }
    }

    /// Returns `true` if this number is stored as an integer.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !matches!(self.n, N::Float(_))
    }

    #[inline]
    pub const fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub const fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::PosInt(u) if u <= i64::MAX as u64 => Some(u as i64),
            N::NegInt(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    pub const fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::PosInt(u) => Some(u),
            _ => None,
        }
    }

    /// Returns the value as `f64`, converting integers lossily.
    pub const fn as_f64(&self) -> f64 {
        match self.n {
            N::PosInt(u) => u as f64,
            N::NegInt(i) => i as f64,
            N::Float(f) => f,
        }
    }

    pub(crate) fn serialize_with<S: serde_core::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match self.n {
            N::PosInt(u) => serializer.serialize_u64(u),
            N::NegInt(i) => serializer.serialize_i64(i),
            N::Float(f) => serializer.serialize_f64(f),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.n, other.n) {
            (N::PosInt(a), N::PosInt(b)) => a == b,
            (N::NegInt(a), N::NegInt(b)) => a == b,
            (N::Float(a), N::Float(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::PosInt(u) => write!(f, "Number({u})"),
            N::NegInt(i) => write!(f, "Number({i})"),
            N::Float(v) => write!(f, "Number({v:?})"),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::PosInt(u) => fmt::Display::fmt(&u, f),
            N::NegInt(i) => fmt::Display::fmt(&i, f),
            N::Float(v) => fmt::Debug::fmt(&v, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Number {
            #[inline]
            fn from(u: $ty) -> Self {
                Self { n: N::PosInt(u as u64) }
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Number {
            #[inline]
            fn from(i: $ty) -> Self {
                if i < 0 {
                    Self { n: N::NegInt(i as i64) }
                } else {
                    Self { n: N::PosInt(i as u64) }
                }
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl From<f32> for Number {
    #[inline]
    fn from(f: f32) -> Self {
        Self::from_f64(f as f64)
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(f: f64) -> Self {
        Self::from_f64(f)
    }
}

// -----------------------------------------------------------------------------
// Tests
