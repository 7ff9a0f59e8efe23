//! Configuration for a single constant-product pair pool.

use crate::domain::{AssetPair, FeeTier};
use crate::error::Result;

/// Immutable parameters of one pool: its canonical pair and fee tier.
///
/// Pools always start empty; the first `mint` sets the initial price.
///
/// # Validation
///
/// - The fee must be strictly below 100%.
/// - Asset distinctness is enforced by [`AssetPair`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    pair: AssetPair,
    fee_tier: FeeTier,
}

impl PoolConfig {
    /// Creates a validated `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`](crate::error::DexError::InvalidFee)
    /// if the fee is 100% or more.
    pub fn new(pair: AssetPair, fee_tier: FeeTier) -> Result<Self> {
        let config = Self { pair, fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`](crate::error::DexError::InvalidFee)
    /// if the fee is 100% or more.
    pub const fn validate(&self) -> Result<()> {
        self.fee_tier.validate()
    }

    /// Returns the asset pair.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
