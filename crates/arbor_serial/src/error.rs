use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use arbor_value::{Number, ValueKind};
use thiserror::Error;

// -----------------------------------------------------------------------------
// ConfigurationError

/// A type declaration is malformed, or a type path is not declared.
///
/// Raised when a [`Descriptor`](crate::object::Descriptor) is created or
/// declared in a [`Registry`](crate::registry::Registry), when a type path
/// is looked up, and when an undeclared object brings a malformed attribute
/// set of its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("attribute `{name}` is listed more than once for `{type_path}`")]
    DuplicateAttribute {
        type_path: &'static str,
        name: &'static str,
    },

    #[error("`{type_path}` lists an empty attribute name")]
    EmptyAttribute { type_path: &'static str },

    #[error("type path `{type_path}` is already declared by a different type")]
    Conflict { type_path: &'static str },

    #[error("no type is declared under `{type_path}`")]
    UnknownTypePath { type_path: String },
}

// -----------------------------------------------------------------------------
// DispatchExhausted

/// Which rule list was being searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Serialize,
    Deserialize,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize => f.write_str("serialize"),
            Self::Deserialize => f.write_str("deserialize"),
        }
    }
}

/// No rule in the registry accepted a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no {direction} rule accepts `{type_name}` at `{path}`")]
pub struct DispatchExhausted {
    pub direction: Direction,
    pub type_name: Cow<'static, str>,
    /// Location inside the tree, such as `$.b.c[2]`.
    pub path: String,
}

// -----------------------------------------------------------------------------
// ValueError

/// A value tree node cannot be turned into the requested Rust type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: ValueKind,
    },

    #[error("number {value} is out of range for {expected}")]
    OutOfRange {
        expected: &'static str,
        value: Number,
    },

    #[error("expected {expected} elements, found {found}")]
    Length { expected: usize, found: usize },

    #[error("map key `{key}` cannot be read as {expected}")]
    Key { key: String, expected: &'static str },

    #[error("non-finite number at `{path}` cannot be written as text")]
    NonFinite { path: String },

    #[error(transparent)]
    Nested(Box<SerialError>),
}

// -----------------------------------------------------------------------------
// ConstructionError

/// A mapping does not fit the constructor of its target type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConstructionError {
    #[error("`{type_path}` has no constructor parameter named {keys:?}")]
    UnknownKeys {
        type_path: &'static str,
        keys: Vec<String>,
    },

    #[error("`{type_path}` requires key `{key}`, which is missing")]
    MissingKey {
        type_path: &'static str,
        key: &'static str,
    },

    #[error("field `{field}` of `{type_path}`: {source}")]
    InvalidField {
        type_path: &'static str,
        field: &'static str,
        #[source]
        source: ValueError,
    },

    #[error("`{type_path}` is built from a map, found {found}")]
    NotAMap {
        type_path: &'static str,
        found: ValueKind,
    },
}

// -----------------------------------------------------------------------------
// SerialError

/// Any failure of a serialize or deserialize operation.
///
/// Errors are never retried or skipped: the first one aborts the operation
/// and is returned to the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerialError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Dispatch(#[from] DispatchExhausted),

    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[cfg(feature = "json")]
    #[error("text codec: {0}")]
    Text(#[from] serde_json::Error),
}

impl From<SerialError> for ValueError {
    #[inline]
    fn from(err: SerialError) -> Self {
        match err {
            SerialError::Value(inner) => inner,
            other => Self::Nested(Box::new(other)),
        }
    }
}
