//! Registry-wide defaults.

use crate::domain::FeeTier;
use crate::error::Result;

/// Parameters applied to pairs created without an explicit fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryConfig {
    default_fee_tier: FeeTier,
}

impl RegistryConfig {
    /// Creates a validated `RegistryConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`](crate::error::DexError::InvalidFee)
    /// if the fee is 100% or more.
    pub fn new(default_fee_tier: FeeTier) -> Result<Self> {
        let config = Self { default_fee_tier };
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
        self.default_fee_tier.validate()
    }

    /// Fee tier given to pairs created through `create_pair`.
    #[must_use]
    pub const fn default_fee_tier(&self) -> FeeTier {
        self.default_fee_tier
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_fee_tier: FeeTier::TIER_0_30_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;

    #[test]
    fn default_is_thirty_bp() {
        assert_eq!(
            RegistryConfig::default().default_fee_tier(),
            FeeTier::TIER_0_30_PERCENT
        );
        assert!(RegistryConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_full_fee() {
        assert!(RegistryConfig::new(FeeTier::new(BasisPoints::new(10_000))).is_err());
        assert!(RegistryConfig::new(FeeTier::TIER_1_00_PERCENT).is_ok());
    }
}
