use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::Registry;

// -----------------------------------------------------------------------------
// RegistryArc

/// A [`Registry`] shared between threads.
///
/// Use this when rules or declarations are added after conversions have
/// started. Lock poisoning is ignored: a panic while holding the lock
/// leaves the registry in whatever state the panicking thread produced.
///
/// # Examples
///
/// ```
/// use arbor_serial::registry::RegistryArc;
///
/// let shared = RegistryArc::default();
/// let value = arbor_serial::convert::serialize(&vec![1, 2], &shared.read()).unwrap();
/// assert_eq!(value.as_seq().map(<[_]>::len), Some(2));
/// ```
#[derive(Clone, Default)]
pub struct RegistryArc {
    /// The wrapped [`Registry`].
    pub internal: Arc<RwLock<Registry>>,
}

impl RegistryArc {
    #[inline]
    pub fn new(registry: Registry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`Registry`].
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`Registry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for RegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("RegistryArc").field(&*self.read()).finish()
    }
}
