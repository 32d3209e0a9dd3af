//! Serializable objects: the capability marker, declared attribute sets,
//! projection and reconstruction.
//!
//! ## Menu
//!
//! - [`Serializable`]: The capability marker. Converts through its own
//!   declared attributes instead of the generic container rules.
//! - [`Declare`]: The static side of a serializable type: type path,
//!   attribute set and constructor.
//! - [`AttributeSet`]: Which attributes are projected.
//! - [`Descriptor`]: The validated declaration stored in a [`Registry`].
//! - [`project`]: Reads the declared attributes of an object.
//! - [`FromValue`] / [`FieldMap`]: Reading typed values out of a tree.
//! - [`reconstruct`] / [`reconstruct_dyn`]: Rebuilding objects from maps.
//! - [`serialize_tagged`] / [`deserialize_tagged`]: The `{type_path: map}` form
//!   for values whose type is not known statically.
//!
//! Most types get all of this from `#[derive(Serializable)]`.
//!
//! [`Registry`]: crate::registry::Registry

// -----------------------------------------------------------------------------
// Modules

mod attribute_set;
mod descriptor;
mod field_map;
mod from_value;
mod project;
mod reconstruct;
mod serializable;
mod tagged;

#[cfg(feature = "std")]
mod ext;

// -----------------------------------------------------------------------------
// Exports

pub use attribute_set::AttributeSet;
pub use descriptor::Descriptor;
pub use field_map::FieldMap;
pub use from_value::FromValue;
pub use project::{Projection, project};
pub use reconstruct::{from_nested, reconstruct, reconstruct_dyn};
pub use serializable::{Declare, Serializable};
pub use tagged::{deserialize_tagged, serialize_tagged};

#[cfg(feature = "std")]
pub use ext::SerializableExt;
