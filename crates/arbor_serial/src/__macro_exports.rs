//! Items used by `#[derive(Serializable)]`. Not public API.

pub use alloc::vec::Vec;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::error::ConfigurationError;
    use crate::registry::Registry;

    /// One type to declare during [`Registry::auto_register`].
    pub struct AutoDeclare(pub fn(&mut Registry) -> Result<bool, ConfigurationError>);

    inventory::collect!(AutoDeclare);

    // Only observed when link-time collection works on this platform.
    fn mark_available(registry: &mut Registry) -> Result<bool, ConfigurationError> {
        registry.mark_auto_registered();
        Ok(false)
    }

    inventory::submit!(AutoDeclare(mark_available));

    pub(crate) fn declare_all(registry: &mut Registry) -> Result<(), ConfigurationError> {
        for AutoDeclare(declare) in inventory::iter::<AutoDeclare> {
            declare(registry)?;
        }
        Ok(())
    }
}
