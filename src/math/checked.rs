//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning checked methods of
//! [`Amount`] and [`Shares`] into `Result`s carrying a [`DexError`], so
//! call sites can use `?` and attach a context string.
//!
//! ```
//! use hydra_dex::domain::Amount;
//! use hydra_dex::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! assert_eq!(a.safe_add(&Amount::new(1), "deposit"), Ok(Amount::new(101)));
//! assert!(a.safe_sub(&Amount::new(101), "withdraw").is_err());
//! ```

use crate::domain::{Amount, Shares};
use crate::error::{DexError, Result};

/// Fallible arithmetic for domain wrapper types.
///
/// No method panics or saturates; every failure surfaces as
/// [`DexError::Overflow`] tagged with the caller's context.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] on overflow.
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_add(other).ok_or(DexError::Overflow(context))
    }

    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_sub(other).ok_or(DexError::Overflow(context))
    }
}

impl CheckedArithmetic for Shares {
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_add(other).ok_or(DexError::Overflow(context))
    }

    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_sub(other).ok_or(DexError::Overflow(context))
    }
}
