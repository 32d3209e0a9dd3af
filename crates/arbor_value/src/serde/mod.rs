//! `serde` bridge for the value tree.
//!
//! This is the seam towards text codecs: any self-describing format can
//! encode a [`Value`](crate::Value) and decode it back through
//! `deserialize_any`.

mod de;
mod ser;
