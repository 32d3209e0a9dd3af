//! The process-wide registry.
//!
//! The first call to [`registry`] freezes it. Before that, [`init`] may
//! install a custom one; afterwards the default is built lazily from
//! [`Registry::new`] plus [`Registry::auto_register`].
//!
//! Frozen means shared and immutable: conversions through it never take a
//! lock. Use [`RegistryArc`](crate::registry::RegistryArc) when rules must
//! change after startup.

use std::sync::OnceLock;

use crate::registry::Registry;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Installs `registry` as the process-wide registry.
///
/// Fails, giving the registry back, if one is already installed or the
/// default was already built.
///
/// # Examples
///
/// ```
/// use arbor_serial::registry::{Registry, global};
///
/// let _ = global::init(Registry::new());
/// assert!(global::is_initialized());
/// assert!(global::init(Registry::empty()).is_err());
/// ```
pub fn init(registry: Registry) -> Result<(), Registry> {
    GLOBAL.set(registry)
}

/// The process-wide registry, building the default on first use.
pub fn registry() -> &'static Registry {
    GLOBAL.get_or_init(default_registry)
}

#[inline]
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

fn default_registry() -> Registry {
    let mut registry = Registry::new();
    match registry.auto_register() {
        Ok(true) => log::debug!("global registry: {} types declared", registry.iter_descriptors().len()),
        Ok(false) => log::debug!("global registry: automatic declaration unavailable"),
        Err(err) => log::error!("global registry: automatic declaration failed: {err}"),
    }
    registry
}
