//! The dispatch registry: ordered conversion rules plus the table of
//! declared serializable types.
//!
//! ## Menu
//!
//! - [`Registry`]: Rule lists and declared [`Descriptor`]s.
//! - [`SerializeRule`] / [`DeserializeRule`]: A predicate and a conversion function.
//! - [`RuleKey`]: The identity of a rule; registering a second rule with the
//!   same key replaces the first in place.
//! - [`Capability`]: The predicates of the baseline serialize rules.
//! - [`RegistryArc`]: A shared, lockable registry for late registration ("std").
//! - [`global`]: The process-wide registry ("std").
//!
//! ## Rule order
//!
//! Rules are tried in registration order and the first match wins.
//! [`Registry::new`] preseeds the baseline rules in this priority:
//!
//! | # | Serialize | Deserialize |
//! |---|-----------|-------------|
//! | 1 | capability marker: delegate to the object | map: convert every value |
//! | 2 | set-like: materialize, then convert as a sequence | sequence: convert every element |
//! | 3 | iterable (never a string): convert every element | primitive: pass through |
//! | 4 | mapping: convert every value, keep key order | |
//! | 5 | primitive: pass through | |
//!
//! A value that matches no rule fails with
//! [`DispatchExhausted`](crate::error::DispatchExhausted).
//!
//! ## auto_register
//!
//! See [`Registry::auto_register`]. Link-time collection is provided by the
//! [`inventory`] crate, which supports all major platforms.
//!
//! [`Descriptor`]: crate::object::Descriptor

// -----------------------------------------------------------------------------
// Modules

mod baseline;
mod type_registry;
mod rule;

#[cfg(feature = "std")]
mod registry_arc;

#[cfg(feature = "std")]
pub mod global;

// -----------------------------------------------------------------------------
// Exports

pub use type_registry::Registry;
pub use rule::{Capability, DeserializeFn, DeserializeRule, RuleKey, SerializeFn, SerializeRule};

#[cfg(feature = "std")]
pub use registry_arc::RegistryArc;
