use serde_core::ser::SerializeMap;
use serde_core::{Serialize, Serializer};

use crate::{Number, Value, ValueMap};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize_with(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Seq(seq) => serializer.collect_seq(seq),
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for Number {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize_with(serializer)
    }
}

impl Serialize for ValueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}
