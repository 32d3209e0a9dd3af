use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::error::ConfigurationError;

/// The attributes of a type that are written by serialization.
///
/// # Examples
///
/// ```
/// use arbor_serial::object::AttributeSet;
///
/// let set = AttributeSet::only(&["b", "a"]);
/// assert!(set.validate("demo::T").is_ok());
/// assert_eq!(set.names(), Some(&["b", "a"][..]));
///
/// let dup = AttributeSet::only(&["a", "a"]);
/// assert!(dup.validate("demo::T").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSet {
    /// Every bound attribute, in declaration order.
    All,
    /// Exactly these attributes, in this order. Names that are not bound on
    /// an instance are skipped.
    Only(Cow<'static, [&'static str]>),
}

impl AttributeSet {
    #[inline]
    pub const fn only(names: &'static [&'static str]) -> Self {
        Self::Only(Cow::Borrowed(names))
    }

    #[inline]
    pub fn from_names(names: Vec<&'static str>) -> Self {
        Self::Only(Cow::Owned(names))
    }

    /// `None` for [`AttributeSet::All`].
    #[inline]
    pub fn names(&self) -> Option<&[&'static str]> {
        match self {
            Self::All => None,
            Self::Only(names) => Some(names),
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|n| *n == name),
        }
    }

    /// Rejects empty and repeated names.
    pub fn validate(&self, type_path: &'static str) -> Result<(), ConfigurationError> {
        let Self::Only(names) = self else {
            return Ok(());
        };
        for (index, &name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigurationError::EmptyAttribute { type_path });
            }
            if names[..index].contains(&name) {
                return Err(ConfigurationError::DuplicateAttribute { type_path, name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AttributeSet;
    use crate::error::ConfigurationError;
    use alloc::vec;

    #[test]
    fn all_contains_everything() {
        assert!(AttributeSet::All.contains("anything"));
        assert_eq!(AttributeSet::All.names(), None);
        assert!(AttributeSet::All.validate("t").is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let set = AttributeSet::from_names(vec!["a", ""]);
        assert_eq!(
            set.validate("t"),
            Err(ConfigurationError::EmptyAttribute { type_path: "t" })
        );
    }

    #[test]
    fn reports_first_duplicate() {
        let set = AttributeSet::only(&["x", "y", "x", "y"]);
        assert_eq!(
            set.validate("t"),
            Err(ConfigurationError::DuplicateAttribute {
                type_path: "t",
                name: "x"
            })
        );
    }
}
