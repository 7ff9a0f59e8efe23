//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::{DexError, Result};

/// The swap fee a pool retains from every input, in basis points.
///
/// The fee stays inside the pool, which is what makes the reserve product
/// grow across swaps.  Valid tiers are strictly below 100%.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::FeeTier;
///
/// let tier = FeeTier::default();
/// assert_eq!(tier.basis_points().get(), 30);
/// assert_eq!(tier.complement(), Ok(9_970));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// Fee-less pool.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05%.
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30%, the default for new pairs.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00%.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier`.  Use [`validate`](Self::validate) before
    /// pricing with an untrusted value.
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Checks that the fee is strictly below 100%.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] for fees of 10 000 bp or more.
    pub const fn validate(&self) -> Result<()> {
        match self.0.complement() {
            Some(c) if c > 0 => Ok(()),
            _ => Err(DexError::InvalidFee("fee must be below 10000 bp")),
        }
    }

    /// `10_000 - fee_bps`, the share of each input that is priced.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if the fee is 100% or more.
    pub const fn complement(&self) -> Result<u32> {
        match self.0.complement() {
            Some(c) if c > 0 => Ok(c),
            _ => Err(DexError::InvalidFee("fee must be below 10000 bp")),
        }
    }

    /// Fee retained on `amount_in`, rounded up in favour of the pool.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] on overflow.
    pub fn fee_on(&self, amount_in: Amount) -> Result<Amount> {
        self.0.apply(amount_in, Rounding::Up)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
