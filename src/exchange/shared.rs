//! Thread-safe handle over an [`Exchange`].

use std::sync::{Arc, RwLock};

use tracing::error;

use super::Exchange;
use crate::error::{DexError, Result};

/// Cloneable, serialized access to one [`Exchange`].
///
/// Every [`write`](Self::write) runs under an exclusive lock, so operations
/// are applied one at a time and none observes another's partial state.
/// A lock poisoned by a panicking writer yields [`DexError::StatePoisoned`].
///
/// ```
/// use hydra_dex::domain::AssetId;
/// use hydra_dex::exchange::{Exchange, SharedExchange};
///
/// let shared = SharedExchange::new(Exchange::default());
/// let a = AssetId::from_bytes([1u8; 20]);
/// let b = AssetId::from_bytes([2u8; 20]);
///
/// shared.write(|ex| ex.create_pair(a, b)).expect("created");
/// assert_eq!(shared.read(|ex| ex.all_pairs_length()).expect("readable"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedExchange {
    inner: Arc<RwLock<Exchange>>,
}

impl SharedExchange {
    /// Wraps `exchange` for shared use.
    #[must_use]
    pub fn new(exchange: Exchange) -> Self {
        Self {
            inner: Arc::new(RwLock::new(exchange)),
        }
    }

    /// Runs `f` under a shared lock.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::StatePoisoned`] if the lock is poisoned.
    pub fn read<T>(&self, f: impl FnOnce(&Exchange) -> T) -> Result<T> {
        let guard = self.inner.read().map_err(|_| poisoned())?;
        Ok(f(&*guard))
    }

    /// Runs the operation `f` under the exclusive lock.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::StatePoisoned`] if the lock is poisoned, or the
    /// operation's own error.
    pub fn write<T>(&self, f: impl FnOnce(&mut Exchange) -> Result<T>) -> Result<T> {
        let mut guard = self.inner.write().map_err(|_| poisoned())?;
        f(&mut *guard)
    }

    /// A copy of the current state.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::StatePoisoned`] if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Exchange> {
        self.read(Exchange::clone)
    }
}

fn poisoned() -> DexError {
    error!("exchange lock poisoned");
    DexError::StatePoisoned
}
