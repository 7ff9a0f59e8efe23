//! Router identity.

use crate::domain::AccountId;
use crate::error::{DexError, Result};

/// Default router account: `0x00..01`.
const DEFAULT_ROUTER_ADDRESS: [u8; 20] = {
    let mut bytes = [0u8; 20];
    bytes[19] = 1;
    bytes
};

/// Parameters of a [`Router`](crate::router::Router).
///
/// `address` is the spender identity owners approve before the router may
/// move their assets or pool shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    address: AccountId,
}

impl RouterConfig {
    /// Creates a validated `RouterConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] for the zero address.
    pub fn new(address: AccountId) -> Result<Self> {
        let config = Self { address };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] for the zero address.
    pub fn validate(&self) -> Result<()> {
        if self.address.is_zero() {
            return Err(DexError::InvalidConfiguration(
                "router address must be non-zero",
            ));
        }
        Ok(())
    }

    /// The router's spender identity.
    #[must_use]
    pub const fn address(&self) -> AccountId {
        self.address
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            address: AccountId::from_bytes(DEFAULT_ROUTER_ADDRESS),
        }
    }
}
