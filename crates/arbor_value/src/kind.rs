use core::fmt;

/// The shape of a [`Value`](crate::Value) node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Seq,
    Map,
}

impl ValueKind {
    /// Returns `true` for the kinds that have no children.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        !matches!(self, Self::Seq | Self::Map)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Seq => "sequence",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
