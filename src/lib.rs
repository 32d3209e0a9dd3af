#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use arbor_serial as serial;
pub use arbor_value as value;

pub use arbor_serial::registry::Registry;
pub use arbor_serial::{Declare, FromValue, SerialError, Serializable};
pub use arbor_value::{Value, ValueMap};

#[cfg(feature = "std")]
pub use arbor_serial::SerializableExt;
