//! Construction of pools from validated configuration.
//!
//! Implementations must re-validate the configuration: a successfully
//! constructed value is guaranteed to be in a valid initial state.  There
//! is no blanket implementation; each pairing is written out explicitly.

use crate::error::Result;

/// Builds `Self` from a configuration of type `C`.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns whatever the configuration's `validate` reports.
    fn from_config(config: &C) -> Result<Self>
    where
        Self: Sized;
}
