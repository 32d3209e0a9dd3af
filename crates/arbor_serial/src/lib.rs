#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// The derive resolves this crate by name through `arbor_macro_utils::Manifest`,
// which only knows the external path, so the crate must also be reachable as
// `arbor_serial` from inside itself.
extern crate self as arbor_serial;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod attr;
pub mod convert;
pub mod error;
pub mod impls;
pub mod object;
pub mod registry;

#[cfg(feature = "json")]
pub mod text;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use arbor_serial_derive as derive;
pub use arbor_value::{Value, ValueKind, ValueMap};

pub use arbor_serial_derive::Serializable;
pub use error::SerialError;
pub use object::{Declare, FromValue, Serializable};

#[cfg(feature = "std")]
pub use object::SerializableExt;
