//! Basis-point representation for fee rates.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::{DexError, Result};
use crate::math::mul_div;

/// Basis-point denominator: 10 000 bp = 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A rate expressed in basis points (1 bp = 0.01%).
///
/// All `u32` values can be stored; [`is_valid_percent`](Self::is_valid_percent)
/// reports whether the value lies in `0..=10_000`.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::BasisPoints;
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.complement(), Some(9_970));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// `10_000 - self`, or `None` above 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<u32> {
        BPS_DENOMINATOR.checked_sub(self.0)
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// The product is formed in 256 bits, so any `u128` amount works for a
    /// rate up to 100%.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result does not fit in `u128`,
    /// which needs a rate above 100%.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        mul_div(
            amount.get(),
            u128::from(self.0),
            u128::from(BPS_DENOMINATOR),
            rounding,
        )
        .map(Amount::new)
        .map_err(|_| DexError::Overflow("basis points apply overflow"))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
